/// Path of the enclosing function, e.g. `my_crate::worker::run`.
///
/// Closure segments are dropped, so a timer inside a closure reports the
/// function that contains it.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::__private::strip_function_name(__type_name_of(__here))
    }};
}

/// Times the rest of the enclosing block.
///
/// ```no_run
/// fn load() {
///     scopetimer_core::scope_timer!("load");
///     // ... work ...
/// } // line written here
/// ```
///
/// Without a label the placeholder `ScopeTimer` is used. Literal and
/// borrowed labels are not copied; `String` and `format_args!` labels with
/// interpolation are owned by the timer. The label is only converted once
/// timing is known to be enabled. Several timers may share a block.
#[cfg(not(feature = "compile-out"))]
#[macro_export]
macro_rules! scope_timer {
    () => {
        let _scope_timer_guard =
            $crate::ScopeTimer::new($crate::function_name!(), $crate::Label::default());
    };
    ($label:expr $(,)?) => {
        let _scope_timer_guard = $crate::ScopeTimer::new($crate::function_name!(), $label);
    };
}

/// Times the rest of the enclosing block when `cond` is true.
///
/// `cond` is evaluated once, up front. The label expression is only
/// evaluated when it is true.
///
/// ```no_run
/// fn sync(verbose: bool) {
///     scopetimer_core::scope_timer_if!(verbose, "sync");
///     // ... work ...
/// }
/// ```
#[cfg(not(feature = "compile-out"))]
#[macro_export]
macro_rules! scope_timer_if {
    ($cond:expr $(,)?) => {
        let _scope_timer_guard = $crate::ConditionalScopeTimer::new(
            $cond,
            $crate::function_name!(),
            $crate::Label::default,
        );
    };
    ($cond:expr, $label:expr $(,)?) => {
        let _scope_timer_guard = $crate::ConditionalScopeTimer::new(
            $cond,
            $crate::function_name!(),
            || $crate::Label::from($label),
        );
    };
}

// Compiled out: nothing is evaluated, the closure only keeps the arguments "used".
#[cfg(feature = "compile-out")]
#[macro_export]
macro_rules! scope_timer {
    () => {};
    ($label:expr $(,)?) => {
        let _ = || {
            let _ = &$label;
        };
    };
}

#[cfg(feature = "compile-out")]
#[macro_export]
macro_rules! scope_timer_if {
    ($cond:expr $(,)?) => {
        let _ = || {
            let _ = &$cond;
        };
    };
    ($cond:expr, $label:expr $(,)?) => {
        let _ = || {
            let _ = (&$cond, &$label);
        };
    };
}
