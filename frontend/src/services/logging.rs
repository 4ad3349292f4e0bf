use log::{Level, LevelFilter, Log, Metadata, Record};

/// `log` backend writing to the browser console
pub struct Logger;

static LOGGER: Logger = Logger;

impl Logger {
    /// Install the console logger. Later calls only adjust the level.
    pub fn init(level: LevelFilter) {
        if log::set_logger(&LOGGER).is_err() {
            log::debug!("Console logger already installed");
        }
        log::set_max_level(level);
    }

    pub fn debug_with_component(component: &str, message: &str) {
        log::debug!(target: component, "{}", message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        log::info!(target: component, "{}", message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        log::warn!(target: component, "{}", message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        log::error!(target: component, "{}", message);
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), record.target(), &record.args().to_string());
        match record.level() {
            Level::Error => gloo::console::error!(line),
            Level::Warn => gloo::console::warn!(line),
            Level::Info => gloo::console::info!(line),
            Level::Debug | Level::Trace => gloo::console::debug!(line),
        }
    }

    fn flush(&self) {}
}

fn format_line(level: Level, target: &str, message: &str) -> String {
    format!("[{}] {}: {}", level, target, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_names_component() {
        assert_eq!(
            format_line(Level::Warn, "plan_form", "Plan list is stale"),
            "[WARN] plan_form: Plan list is stale"
        );
    }
}
