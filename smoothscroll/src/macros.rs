// Tracing shims. Without the `tracing` feature the arguments are never evaluated.

#[cfg(feature = "tracing")]
macro_rules! sslog {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "smoothscroll", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! sslog {
    ($level:ident, $($tt:tt)*) => {};
}

macro_rules! sstrace {
    ($($tt:tt)*) => {
        sslog!(trace, $($tt)*)
    };
}

macro_rules! ssdebug {
    ($($tt:tt)*) => {
        sslog!(debug, $($tt)*)
    };
}

macro_rules! sswarn {
    ($($tt:tt)*) => {
        sslog!(warn, $($tt)*)
    };
}
