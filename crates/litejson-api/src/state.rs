//! Shared application state.

use litejson_convert::Converter;
use litejson_core::Config;

/// State handed to every handler. The converter is stateless per request, so one
/// instance serves all connections.
#[derive(Clone, Debug)]
pub struct AppState {
    pub converter: Converter,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            converter: Converter::new(config.converter.clone()),
            config,
        }
    }

    /// Largest request body accepted before multipart parsing gives up
    pub fn body_limit(&self) -> usize {
        body_limit(self.config.converter.max_file_size)
    }
}

/// Multipart framing allowance on top of the largest accepted file
const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;

pub(crate) fn body_limit(max_file_size: u64) -> usize {
    usize::try_from(max_file_size.saturating_add(MULTIPART_OVERHEAD_BYTES)).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_limit_adds_overhead() {
        assert_eq!(body_limit(50 * 1024 * 1024), 51 * 1024 * 1024);
        assert_eq!(body_limit(u64::MAX), usize::MAX);
    }
}
