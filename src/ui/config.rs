use eframe::egui::Color32;

use crate::domain::Chain;
pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub display_backdrop: Color32,
    pub placeholder: Color32,
    pub chain_btc: Color32,
    pub chain_eth: Color32,
    pub chain_tez: Color32,
    pub chain_sol: Color32,
    pub chain_other: Color32,
}

#[derive(Clone, Copy, Default)]
pub struct UiLayout {
    pub side_panel_width: f32,
    pub thumbnail_size: f32,
    pub grid_spacing: f32,
    pub display_controls_height: f32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub layout: UiLayout,
}

impl UiConfig {
    pub fn chain_color(&self, chain: Option<Chain>) -> Color32 {
        match chain {
            Some(Chain::Ordinals) => self.colors.chain_btc,
            Some(Chain::Ethereum) => self.colors.chain_eth,
            Some(Chain::Tezos) => self.colors.chain_tez,
            Some(Chain::Solana) => self.colors.chain_sol,
            None => self.colors.chain_other,
        }
    }
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::from_rgb(235, 225, 200),
        subsection_heading: Color32::from_rgb(190, 170, 130),
        central_panel: Color32::from_rgb(12, 12, 12),
        side_panel: Color32::from_rgb(22, 22, 22),
        display_backdrop: Color32::BLACK,
        placeholder: Color32::from_rgb(40, 40, 40),
        chain_btc: Color32::from_rgb(247, 147, 26),
        chain_eth: Color32::from_rgb(130, 145, 230),
        chain_tez: Color32::from_rgb(44, 125, 247),
        chain_sol: Color32::from_rgb(153, 69, 255),
        chain_other: Color32::GRAY,
    },
    layout: UiLayout {
        side_panel_width: 220.0,
        thumbnail_size: 120.0,
        grid_spacing: 8.0,
        display_controls_height: 44.0,
    },
};
