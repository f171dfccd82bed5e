// Copyright 2026 the x11-shell Authors
// SPDX-License-Identifier: Apache-2.0

//! Small shared macros.

/// Log and discard the error of a fire-and-forget X11 request.
///
/// These requests only fail when the connection to the server is gone, in
/// which case the event pump surfaces the loss on its own; there is nothing
/// useful the caller could do with the error at the request site.
macro_rules! log_x11 {
    ($val:expr) => {
        if let Err(e) = $val {
            tracing::error!("X11 error: {}", e);
        }
    };
}

/// Wrapper around `RefCell::try_borrow` that turns an active borrow into an
/// [`Error::Invalid`](crate::error::Error::Invalid) instead of panicking.
macro_rules! borrow {
    ($val:expr) => {
        $val.try_borrow().map_err(|_| {
            tracing::error!("[{}:{}] {} already borrowed", file!(), line!(), stringify!($val));
            $crate::error::Error::Invalid("state already borrowed")
        })
    };
}

/// Mutable variant of [`borrow!`].
macro_rules! borrow_mut {
    ($val:expr) => {
        $val.try_borrow_mut().map_err(|_| {
            tracing::error!("[{}:{}] {} already borrowed", file!(), line!(), stringify!($val));
            $crate::error::Error::Invalid("state already borrowed")
        })
    };
}
