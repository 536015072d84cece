//! Standalone demo: opens a window with a squat stepper and a bench stepper
//! in effort mode, both persisted to the user config directory.

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_stepper::{
    DisplayConfig, JsonFileStore, Stepper, StepperConfig, weight_stepper,
};
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let store = Rc::new(JsonFileStore::open(JsonFileStore::default_path()));

    let squat = match Stepper::new(StepperConfig::default(), Rc::clone(&store)) {
        Ok(stepper) => stepper,
        Err(err) => {
            eprintln!("invalid squat config: {err}");
            return;
        }
    };
    let bench_config = StepperConfig {
        label: "BENCH".to_string(),
        storage_key: "bench-value".to_string(),
        effort_storage_key: "bench-rpe".to_string(),
        display: DisplayConfig::effort(),
        ..StepperConfig::default()
    };
    let mut bench = match Stepper::new(bench_config, store) {
        Ok(stepper) => stepper,
        Err(err) => {
            eprintln!("invalid bench config: {err}");
            return;
        }
    };
    bench.set_on_change(|v| tracing::info!(value = v, "bench changed"));

    floem::Application::new()
        .window(
            move |_| {
                let (squat_handle, squat_view) = weight_stepper(squat);
                let (_, bench_view) = weight_stepper(bench);
                squat_handle.focus();
                v_stack((squat_view, bench_view))
                    .on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                        floem::quit_app()
                    })
            },
            Some(
                WindowConfig::default()
                    .size((640.0, 420.0))
                    .title("floem-stepper"),
            ),
        )
        .run();
}
