mod app;
mod bindings;
mod color;
mod components;
mod configuration;
mod flow;
mod overlay;
mod password_toggle;
mod phase;
mod range_feedback;
mod submission;
mod text_input;
mod theme;
mod validation;

use gpui::{
    Application, Bounds, WindowBackgroundAppearance, WindowBounds, WindowOptions, prelude::*, px,
    size,
};

use crate::{
    app::{FlowInputs, FormFlowApp, Quit},
    bindings::bind_keys,
    configuration::Settings,
    theme::{WINDOW_HEIGHT, WINDOW_WIDTH},
};

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("signup_flow=info"),
    )
    .init();

    log::info!(
        "signup-flow v{} starting (RUST_LOG={})",
        env!("CARGO_PKG_VERSION"),
        std::env::var("RUST_LOG").unwrap_or_else(|_| "<default: info>".into()),
    );

    let settings = Settings::load();
    log::info!(
        "[startup] transition delay {:?}, range {}..{} (default {})",
        settings.transition_delay(),
        settings.range.min,
        settings.range.max,
        settings.range.default,
    );

    Application::new().run(move |context| {
        let bounds = Bounds::centered(None, size(px(WINDOW_WIDTH), px(WINDOW_HEIGHT)), context);

        bind_keys(context);

        let window = context.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                titlebar: None,
                window_background: WindowBackgroundAppearance::Opaque,
                ..Default::default()
            },
            |_, context| {
                let inputs = FlowInputs::new(context);
                context.new(|context| FormFlowApp::new(&settings, inputs, context))
            },
        );

        match window {
            Ok(window) => {
                if let Err(error) = window.update(context, |view, window, context| {
                    let handle = view.login_email_input(context);
                    window.focus(&handle, context);
                    context.activate(true);
                }) {
                    log::error!("[startup] failed to initialize application window: {error}");
                    context.quit();
                    return;
                }

                context.on_action(|_: &Quit, context| context.quit());
            }
            Err(error) => {
                log::error!("[startup] failed to open application window: {error}");
                context.quit();
            }
        }
    });
}
