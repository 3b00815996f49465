// src/driver.rs

//! Driver entry point: brackets the application callback with native library
//! initialization and teardown.

use crate::error::{Result, ScreenError};
use crate::native::SdlAdapter;
use crate::screen::Screen;
use log::{error, info};
use std::rc::Rc;

/// Calls `quit` when dropped, so teardown also happens if the callback panics.
struct QuitGuard<A: SdlAdapter>(Rc<A>);

impl<A: SdlAdapter> Drop for QuitGuard<A> {
    fn drop(&mut self) {
        info!("Shutting down native library");
        self.0.quit();
    }
}

/// Initializes `adapter`, hands a [`Screen`] to `f`, and tears the library
/// down once `f` returns.
///
/// The screen is dropped before teardown. Resources moved out of the callback
/// outlive the library and are not released natively.
pub fn run<A, F, R>(adapter: A, f: F) -> Result<R>
where
    A: SdlAdapter,
    F: FnOnce(&mut Screen<A>) -> R,
{
    info!("Initializing native library");
    adapter.init().map_err(|e| {
        error!("Native library initialization failed: {:#}", e);
        ScreenError::platform(e)
    })?;
    let adapter = Rc::new(adapter);
    let _quit = QuitGuard(Rc::clone(&adapter));
    let mut screen = Screen::new(adapter);
    Ok(f(&mut screen))
}

/// Runs `f` against the live SDL2 adapter.
#[cfg(feature = "sdl")]
pub fn main<F, R>(f: F) -> Result<R>
where
    F: FnOnce(&mut Screen<crate::native::live::LiveSdlAdapter>) -> R,
{
    run(crate::native::live::LiveSdlAdapter::new(), f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;
    use crate::native::mock::{MockCall, MockOp, MockSdlAdapter};
    use crate::screen::NewWindowOptions;
    use test_log::test;

    #[test]
    fn it_should_initialize_before_and_quit_after_the_callback() {
        let mock = MockSdlAdapter::new();
        let observed = mock.clone();

        let calls_inside = run(mock.clone(), |screen| {
            let _window = screen
                .new_window(&NewWindowOptions {
                    width: 8,
                    height: 8,
                })
                .unwrap();
            observed.calls()
        })
        .unwrap();

        assert_eq!(calls_inside.first(), Some(&MockCall::Init));
        assert!(!calls_inside.contains(&MockCall::Quit));
        let calls = mock.calls();
        assert_eq!(calls.last(), Some(&MockCall::Quit));
        // The window created inside the callback is gone before teardown.
        let destroyed = calls
            .iter()
            .position(|c| matches!(c, MockCall::DestroyWindow { .. }))
            .unwrap();
        assert!(destroyed < calls.len() - 1);
    }

    #[test]
    fn it_should_not_run_the_callback_when_init_fails() {
        let mock = MockSdlAdapter::new();
        mock.fail_next(MockOp::Init, "No available video device");

        let result = run(mock.clone(), |_| panic!("callback must not run"));

        assert_eq!(
            result.unwrap_err(),
            ScreenError::Platform("No available video device".to_string())
        );
        assert_eq!(mock.calls(), vec![MockCall::Init]);
    }

    #[test]
    fn it_should_quit_even_if_the_callback_panics() {
        let mock = MockSdlAdapter::new();
        let inner = mock.clone();
        let outcome = std::panic::catch_unwind(move || {
            run(inner, |screen| {
                let _ = screen.new_buffer(Point::new(1, 1));
                panic!("application failure");
            })
        });
        assert!(outcome.is_err());
        assert_eq!(mock.calls().last(), Some(&MockCall::Quit));
    }
}
