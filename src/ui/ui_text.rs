/// Every user-facing string in one place.
pub struct UiText {
    pub app_title: &'static str,
    pub timeline_heading: &'static str,
    pub filter_heading: &'static str,
    pub filter_all: &'static str,
    pub menu_toggle: &'static str,
    pub home_button: &'static str,

    pub hero_heading: &'static str,
    pub play: &'static str,
    pub pause: &'static str,
    pub enter_display: &'static str,
    pub display_collection: &'static str,
    pub display_piece: &'static str,

    pub pieces_label: &'static str,
    pub chain_label: &'static str,
    pub year_label: &'static str,
    pub editions_label: &'static str,
    pub editions_yes: &'static str,
    pub editions_no: &'static str,
    pub artist_note_heading: &'static str,
    pub marketplaces_heading: &'static str,
    pub traits_heading: &'static str,
    pub grid_heading: &'static str,
    pub download: &'static str,
    pub download_busy: &'static str,
    pub download_saved_prefix: &'static str,
    pub download_fallback: &'static str,

    pub display_prev: &'static str,
    pub display_next: &'static str,
    pub display_shuffle: &'static str,
    pub display_close: &'static str,
    pub display_next_in: &'static str,

    pub lightbox_hint: &'static str,

    pub media_unavailable: &'static str,
    pub media_interactive: &'static str,
    pub media_video: &'static str,
    pub open_in_browser: &'static str,

    pub catalog_empty: &'static str,
    pub catalog_source_prefix: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    app_title: "Stranger Solemn - Gallery",
    timeline_heading: "Timeline",
    filter_heading: "Chain",
    filter_all: "All",
    menu_toggle: "☰ Collections",
    home_button: "⌂ Home",

    hero_heading: "Now showing",
    play: "▶ Play",
    pause: "⏸ Pause",
    enter_display: "⛶ Display mode",
    display_collection: "⛶ Display collection",
    display_piece: "⛶",

    pieces_label: "Pieces",
    chain_label: "Chain",
    year_label: "Year",
    editions_label: "Editions",
    editions_yes: "Yes",
    editions_no: "No",
    artist_note_heading: "Artist note",
    marketplaces_heading: "Marketplaces",
    traits_heading: "Traits",
    grid_heading: "Pieces",
    download: "⬇ Download",
    download_busy: "Downloading…",
    download_saved_prefix: "Saved to ",
    download_fallback: "Download failed, opened in browser instead",

    display_prev: "◀",
    display_next: "▶",
    display_shuffle: "🔀 Shuffle",
    display_close: "✕ Close",
    display_next_in: "Next in",

    lightbox_hint: "Click anywhere or press Esc to close",

    media_unavailable: "Media unavailable",
    media_interactive: "Interactive on-chain piece",
    media_video: "Video piece",
    open_in_browser: "Open in browser ↗",

    catalog_empty: "No collections to show.",
    catalog_source_prefix: "Catalog: ",
};
