//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep noisy ones `false` by default.
//! Every call site is additionally gated by `cfg(debug_assertions)` so release
//! builds stay quiet.

pub struct DebugFlags {
    /// Emit UI interaction logs (timeline clicks, buttons, shortcuts).
    pub print_ui_interactions: bool,
    /// Emit every Session Controller state transition.
    pub print_session_transitions: bool,
    /// Emit each slideshow / display-mode pick.
    pub print_selection_picks: bool,
    /// Emit catalog normalisation details (synthesised pieces, dropped duplicates).
    pub print_catalog_loading: bool,
    /// Emit media slot teardown / activation.
    pub print_media_slots: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_ui_interactions: true,
    print_session_transitions: true,
    print_selection_picks: false,
    print_catalog_loading: false,
    print_media_slots: false,
};
