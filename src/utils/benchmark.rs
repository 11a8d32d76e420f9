// File: benchmark.rs
// Timing helpers for the analysis stages

/// Evaluate an expression and report the elapsed wall time on stderr.
/// With a second boolean argument, the report is printed only when it is true.
#[macro_export]
macro_rules! measure_time {
    ($e:expr) => {
        $crate::measure_time!($e, true)
    };
    ($e:expr, $verbose:expr) => {{
        let start = std::time::Instant::now();
        let result = $e;
        if $verbose {
            $crate::utils::log::print_log_msg(
                $crate::utils::log::INFO,
                &format!("{} took {:.3?}", stringify!($e), start.elapsed()),
            );
        }
        result
    }};
}
