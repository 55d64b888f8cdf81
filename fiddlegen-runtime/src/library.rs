//! Active native library for the current thread.
//!
//! Generated factories take no arguments, so handle resolution goes through a
//! thread-local slot. Wrappers hold `Rc` handles and are therefore `!Send`:
//! a wrapper lives and dies on the thread whose library created it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::native::{FuncHandle, NativeError, NativeLibrary};

thread_local! {
    static ACTIVE_LIBRARY: RefCell<Option<Rc<dyn NativeLibrary>>> = const { RefCell::new(None) };
}

/// Restores the previously installed library when dropped.
#[must_use = "dropping the guard immediately uninstalls the library"]
pub struct LibraryGuard {
    previous: Option<Rc<dyn NativeLibrary>>,
}

impl Drop for LibraryGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        ACTIVE_LIBRARY.with(|slot| *slot.borrow_mut() = previous);
    }
}

/// Install `library` as this thread's active library.
pub fn install_library(library: Rc<dyn NativeLibrary>) -> LibraryGuard {
    let previous = ACTIVE_LIBRARY.with(|slot| slot.borrow_mut().replace(library));
    LibraryGuard { previous }
}

/// Resolve a function handle by catalog name.
pub fn try_function_handle(name: &str) -> Result<FuncHandle, NativeError> {
    let library = ACTIVE_LIBRARY
        .with(|slot| slot.borrow().clone())
        .ok_or(NativeError::NoLibrary)?;
    if !library.contains(name) {
        return Err(NativeError::UnknownFunction(name.to_string()));
    }
    Ok(FuncHandle::new(name, library))
}

/// Resolve a function handle by catalog name; panics if it cannot be resolved.
pub fn function_handle(name: &str) -> FuncHandle {
    match try_function_handle(name) {
        Ok(handle) => handle,
        Err(err) => panic!("{name}: failed to resolve function handle: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakeFunction, FakeLibrary};

    #[test]
    fn resolve_without_library_fails() {
        assert_eq!(
            try_function_handle("SMA").unwrap_err(),
            NativeError::NoLibrary
        );
    }

    #[test]
    fn resolve_known_and_unknown_functions() {
        let library = Rc::new(FakeLibrary::new().with_function("SMA", FakeFunction::fixed(0)));
        let _guard = install_library(library);

        assert_eq!(try_function_handle("SMA").unwrap().name(), "SMA");
        assert_eq!(
            try_function_handle("EMA").unwrap_err(),
            NativeError::UnknownFunction("EMA".into())
        );
    }

    #[test]
    fn guard_restores_previous_library() {
        let outer = Rc::new(FakeLibrary::new().with_function("SMA", FakeFunction::fixed(0)));
        let _outer_guard = install_library(outer);
        {
            let inner = Rc::new(FakeLibrary::new().with_function("EMA", FakeFunction::fixed(0)));
            let _inner_guard = install_library(inner);
            assert!(try_function_handle("SMA").is_err());
            assert!(try_function_handle("EMA").is_ok());
        }
        assert!(try_function_handle("SMA").is_ok());
    }

    #[test]
    #[should_panic(expected = "RSI: failed to resolve function handle")]
    fn function_handle_panics_with_name() {
        let _ = function_handle("RSI");
    }
}
