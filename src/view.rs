//! Floem view for a [`Stepper`]: title, derived row, the interactive value
//! box, chevrons, and the effort selector.

use std::cell::RefCell;
use std::rc::Rc;

use floem::View;
use floem::ViewId;
use floem::event::{Event, EventListener, EventPropagation};
use floem::keyboard::{Key, NamedKey};
use floem::prelude::*;
use floem::reactive::{RwSignal, SignalGet, SignalUpdate, SignalWith};
use floem::text::Weight;

use crate::constants;
use crate::display::DerivedValue;
use crate::error::StepperError;
use crate::gesture::KeyCommand;
use crate::math::pad_display;
use crate::stepper::Stepper;

/// Reactive mirror of the stepper state the view renders.
#[derive(Clone, Copy)]
struct Mirror {
    value: RwSignal<i64>,
    effort: RwSignal<Option<u8>>,
    derived: RwSignal<Vec<DerivedValue>>,
}

impl Mirror {
    fn new(stepper: &Stepper) -> Self {
        Self {
            value: RwSignal::new(stepper.value()),
            effort: RwSignal::new(stepper.effort()),
            derived: RwSignal::new(stepper.derived().to_vec()),
        }
    }

    fn sync(&self, stepper: &Stepper) {
        if self.value.get_untracked() != stepper.value() {
            self.value.set(stepper.value());
        }
        if self.effort.get_untracked() != stepper.effort() {
            self.effort.set(stepper.effort());
        }
        if self.derived.with_untracked(|d| d.as_slice() != stepper.derived()) {
            self.derived.set(stepper.derived().to_vec());
        }
    }
}

/// Imperative access to a mounted stepper.
#[derive(Clone)]
pub struct StepperHandle {
    stepper: Rc<RefCell<Stepper>>,
    mirror: Mirror,
    element: ViewId,
}

impl StepperHandle {
    pub fn value(&self) -> i64 {
        self.stepper.borrow().value()
    }

    /// Set the value (clamped), persist it, and notify.
    pub fn set_value(&self, v: i64) {
        self.mutate(|s| s.set_value(v));
    }

    pub fn set_effort(&self, level: u8) -> Result<(), StepperError> {
        self.mutate(|s| s.set_effort(level))
    }

    /// Give keyboard focus to the value box.
    pub fn focus(&self) {
        self.element.request_focus();
    }

    /// The value box, which receives drag, wheel, and key input.
    pub fn element(&self) -> ViewId {
        self.element
    }

    /// A signal tracking the committed value.
    pub fn value_signal(&self) -> RwSignal<i64> {
        self.mirror.value
    }

    pub fn with_stepper<R>(&self, f: impl FnOnce(&Stepper) -> R) -> R {
        f(&*self.stepper.borrow())
    }

    // The stepper borrow must end before signals or the change callback fire,
    // since both may read the stepper again.
    fn mutate<R>(&self, f: impl FnOnce(&mut Stepper) -> R) -> R {
        let (out, mut callback, committed) = {
            let mut stepper = self.stepper.borrow_mut();
            let callback = stepper.take_on_change();
            let before = stepper.commits();
            let out = f(&mut *stepper);
            (out, callback, stepper.commits() != before)
        };
        self.mirror.sync(&self.stepper.borrow());
        if committed && let Some(cb) = callback.as_mut() {
            let value = self.stepper.borrow().value();
            cb(value);
        }
        self.stepper.borrow_mut().restore_on_change(callback);
        out
    }
}

/// Builds the stepper view and returns a handle to drive it.
pub(crate) fn stepper_view(stepper: Stepper) -> (StepperHandle, impl IntoView) {
    let title = stepper.label().to_string();
    let levels = stepper.effort_levels();
    let mirror = Mirror::new(&stepper);
    let stepper = Rc::new(RefCell::new(stepper));

    let value = mirror.value;
    let value_box = label(move || pad_display(value.get()))
        .keyboard_navigable()
        .style(|s| {
            s.width(constants::BOX_WIDTH)
                .height(constants::BOX_HEIGHT)
                .items_center()
                .justify_center()
                .font_size(constants::VALUE_FONT)
                .font_family(constants::MONOSPACE.to_string())
                .border(2.0)
                .border_color(constants::BORDER)
                .border_radius(constants::RADIUS)
                .background(constants::BOX_BACKGROUND)
                .cursor(floem::style::CursorStyle::Pointer)
                .focus_visible(|s| s.border_color(constants::SELECTED))
        });

    let handle = StepperHandle {
        stepper,
        mirror,
        element: value_box.id(),
    };

    let value_box = attach_gestures(value_box, handle.clone());

    let view = v_stack((
        label(move || title.clone()).style(|s| {
            s.font_size(constants::TITLE_FONT)
                .font_weight(Weight::BOLD)
                .justify_center()
        }),
        h_stack((
            derived_row(mirror.derived),
            value_box,
            chevrons(handle.clone()),
            label(|| "kg").style(|s| {
                s.font_size(constants::VALUE_FONT)
                    .font_family(constants::MONOSPACE.to_string())
            }),
        ))
        .style(|s| s.items_center().justify_center().gap(constants::GAP)),
        effort_row(levels, handle.clone()),
    ))
    .style(|s| {
        s.items_center()
            .gap(constants::GAP / 2.0)
            .padding(constants::PADDING)
    });

    (handle, view)
}

fn attach_gestures<V: View + 'static>(view: V, handle: StepperHandle) -> V {
    let down = handle.clone();
    let moved = handle.clone();
    let up = handle.clone();
    let lost = handle.clone();
    let wheel = handle.clone();
    let keys = handle;

    view.on_event(EventListener::PointerDown, move |e| {
        if let Event::PointerDown(pe) = e {
            down.mutate(|s| s.drag_start(pe.pos.y));
            down.element.request_active();
            down.element.request_focus();
            return EventPropagation::Stop;
        }
        EventPropagation::Continue
    })
    .on_event(EventListener::PointerMove, move |e| {
        if let Event::PointerMove(pe) = e
            && moved.mutate(|s| s.drag_move(pe.pos.y))
        {
            return EventPropagation::Stop;
        }
        EventPropagation::Continue
    })
    .on_event(EventListener::PointerUp, move |_| {
        up.mutate(Stepper::drag_end);
        EventPropagation::Continue
    })
    .on_event(EventListener::FocusLost, move |_| {
        lost.mutate(Stepper::drag_end);
        EventPropagation::Continue
    })
    .on_event(EventListener::PointerWheel, move |e| {
        if let Event::PointerWheel(we) = e
            && wheel.mutate(|s| s.wheel(we.delta.y))
        {
            return EventPropagation::Stop;
        }
        EventPropagation::Continue
    })
    .on_event(EventListener::KeyDown, move |e| {
        if let Event::KeyDown(ke) = e
            && let Some(command) = key_command(&ke.key.logical_key)
            && keys.mutate(|s| s.key(command))
        {
            return EventPropagation::Stop;
        }
        EventPropagation::Continue
    })
}

fn key_command(key: &Key) -> Option<KeyCommand> {
    match key {
        Key::Named(NamedKey::ArrowUp) => Some(KeyCommand::Increment),
        Key::Named(NamedKey::ArrowDown) => Some(KeyCommand::Decrement),
        _ => None,
    }
}

fn derived_row(derived: RwSignal<Vec<DerivedValue>>) -> impl IntoView {
    dyn_stack(
        move || derived.get(),
        |d| (d.label.clone(), d.value),
        |d| {
            let caption = d.label.clone();
            let number = format!("{}kg", d.formatted());
            v_stack((
                label(move || number.clone()).style(|s| {
                    s.font_size(constants::VALUE_FONT)
                        .font_family(constants::MONOSPACE.to_string())
                }),
                label(move || caption.clone()).style(|s| {
                    s.font_size(constants::CAPTION_FONT)
                        .color(constants::CAPTION)
                        .justify_center()
                }),
            ))
            .style(|s| s.items_center())
        },
    )
    .style(|s| s.gap(constants::GAP).items_center())
}

fn chevrons(handle: StepperHandle) -> impl IntoView {
    let up = handle.clone();
    let down = handle;
    v_stack((
        chevron(lucide_icons::Icon::ChevronUp, move || {
            up.mutate(|s| s.key(KeyCommand::Increment));
        }),
        chevron(lucide_icons::Icon::ChevronDown, move || {
            down.mutate(|s| s.key(KeyCommand::Decrement));
        }),
    ))
}

fn chevron(icon: lucide_icons::Icon, on_press: impl Fn() + 'static) -> impl IntoView {
    let glyph = icon.unicode().to_string();
    label(move || glyph.clone())
        .style(|s| {
            s.size(constants::CHEVRON_SIZE, constants::CHEVRON_SIZE)
                .items_center()
                .justify_center()
                .font_size(14.0)
                .font_family("lucide".to_string())
                .color(constants::CAPTION)
                .border_radius(3.0)
                .cursor(floem::style::CursorStyle::Pointer)
                .hover(|s| s.background(Color::rgb8(230, 230, 230)))
        })
        .on_click_stop(move |_| on_press())
}

fn effort_row(levels: Vec<u8>, handle: StepperHandle) -> impl IntoView {
    let effort = handle.mirror.effort;
    h_stack_from_iter(levels.into_iter().map(move |level| {
        let handle = handle.clone();
        label(move || format!("RPE {level}"))
            .style(move |s| {
                let selected = effort.get() == Some(level);
                let s = s
                    .padding_horiz(6.0)
                    .padding_vert(2.0)
                    .font_size(constants::CAPTION_FONT)
                    .border(1.0)
                    .border_radius(constants::RADIUS)
                    .cursor(floem::style::CursorStyle::Pointer);
                if selected {
                    s.border_color(constants::SELECTED)
                        .color(constants::SELECTED)
                } else {
                    s.border_color(constants::BORDER).color(constants::CAPTION)
                }
            })
            .on_click_stop(move |_| {
                if let Err(err) = handle.set_effort(level) {
                    tracing::warn!(%err, "effort selection rejected");
                }
            })
    }))
    .style(|s| s.gap(4.0).justify_center())
}
