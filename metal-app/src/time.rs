use std::time::Instant;

const MICROS_PER_MILLI: u128 = 1000;

pub fn debug_time<T>(label: &'static str, f: impl FnOnce() -> T) -> T {
    if !log::log_enabled!(log::Level::Debug) {
        return f();
    }
    let now = Instant::now();
    let r = f();
    let elapsed_micro = now.elapsed().as_micros();
    let (elapsed_display, unit) = if elapsed_micro > MICROS_PER_MILLI {
        (elapsed_micro / MICROS_PER_MILLI, "ms")
    } else {
        (elapsed_micro, "μs")
    };
    log::debug!("[{label:<40}] {elapsed_display:>6} {unit}");
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_time_returns_result() {
        assert_eq!(debug_time("add", || 1 + 2), 3);
    }
}
