use std::sync::OnceLock;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// True when `BITONAL_DEBUG` is set to anything other than `0`.
pub(crate) fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| {
        std::env::var("BITONAL_DEBUG")
            .map(|v| v.trim() != "0")
            .unwrap_or(false)
    })
}
