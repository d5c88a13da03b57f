//! Navigation bar and title overlay.
//!
//! [`Chrome`] only holds animated state and produces a flat list of
//! [`OverlayItem`]s; the renderer turns those into 2D draw calls. Keeping
//! layout free of GPU types lets it run in tests.

use crate::color::Color;
use crate::config::ChromeConfig;
use crate::scene::Viewport;

const EDGE_PADDING: f32 = 32.0;
const LINK_SPACING: f32 = 32.0;
/// Title baseline band, as a fraction of the viewport height.
const TITLE_BAND: f32 = 0.78;

/// A rectangle in screen-space pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Which font a label is set in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextStyle {
    Nav,
    Title,
}

#[derive(Clone, Debug, PartialEq)]
pub enum OverlayItem {
    Quad {
        rect: Rect,
        color: Color,
    },
    /// Text with its top-left corner at `(x, y)`.
    Label {
        x: f32,
        y: f32,
        style: TextStyle,
        text: String,
        color: Color,
    },
}

#[derive(Clone, Debug)]
pub struct Chrome {
    /// Vertical offset of the nav bar in units of its height: `-1.0` is fully
    /// above the window, `0.0` is resting.
    pub nav_offset: f32,
    /// Title alpha multiplier, `0.0` to `1.0`.
    pub title_opacity: f32,
    pub brand: String,
    pub links: Vec<String>,
    pub title: String,
    pub nav_height: f32,
    pub nav_font_size: f32,
    pub title_font_size: f32,
    pub text_color: Color,
    pub nav_background: Color,
}

impl Chrome {
    /// Chrome at rest: nav in place, title visible.
    pub fn new(config: &ChromeConfig) -> Self {
        Self {
            nav_offset: 0.0,
            title_opacity: 1.0,
            brand: config.brand.clone(),
            links: config.links.clone(),
            title: config.title.clone(),
            nav_height: config.nav_height,
            nav_font_size: config.nav_font_size,
            title_font_size: config.title_font_size,
            text_color: Color::from_hex(config.text_color),
            nav_background: Color::rgba(1.0, 1.0, 1.0, 0.06),
        }
    }

    pub fn font_size(&self, style: TextStyle) -> f32 {
        match style {
            TextStyle::Nav => self.nav_font_size,
            TextStyle::Title => self.title_font_size,
        }
    }

    /// Screen rectangle of the nav bar at its current offset.
    pub fn nav_rect(&self, viewport: Viewport) -> Rect {
        Rect::new(
            0.0,
            self.nav_offset * self.nav_height,
            viewport.width as f32,
            self.nav_height,
        )
    }

    /// Lay out the overlay. `measure` returns the pixel width of a string.
    pub fn layout(
        &self,
        viewport: Viewport,
        measure: impl Fn(TextStyle, &str) -> f32,
    ) -> Vec<OverlayItem> {
        let mut items = Vec::with_capacity(self.links.len() + 3);
        let nav = self.nav_rect(viewport);

        if nav.bottom() > 0.0 {
            items.push(OverlayItem::Quad {
                rect: nav,
                color: self.nav_background,
            });

            let text_y = nav.y + (nav.height - self.nav_font_size) * 0.5;
            items.push(OverlayItem::Label {
                x: EDGE_PADDING,
                y: text_y,
                style: TextStyle::Nav,
                text: self.brand.clone(),
                color: self.text_color,
            });

            // Links are right-aligned, laid out from the right edge inward.
            let mut right = nav.width - EDGE_PADDING;
            let mut links = Vec::with_capacity(self.links.len());
            for link in self.links.iter().rev() {
                let x = right - measure(TextStyle::Nav, link);
                links.push(OverlayItem::Label {
                    x,
                    y: text_y,
                    style: TextStyle::Nav,
                    text: link.clone(),
                    color: self.text_color,
                });
                right = x - LINK_SPACING;
            }
            items.extend(links.into_iter().rev());
        }

        let opacity = self.title_opacity.clamp(0.0, 1.0);
        if opacity > 0.0 {
            let width = measure(TextStyle::Title, &self.title);
            items.push(OverlayItem::Label {
                x: (viewport.width as f32 - width) * 0.5,
                y: viewport.height as f32 * TITLE_BAND - self.title_font_size * 0.5,
                style: TextStyle::Title,
                text: self.title.clone(),
                color: self.text_color.faded(opacity),
            });
        }

        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 800,
        height: 600,
    };

    fn monospace(style: TextStyle, text: &str) -> f32 {
        let advance = match style {
            TextStyle::Nav => 10.0,
            TextStyle::Title => 20.0,
        };
        text.chars().count() as f32 * advance
    }

    fn labels(items: &[OverlayItem]) -> Vec<(&str, f32, f32)> {
        items
            .iter()
            .filter_map(|item| match item {
                OverlayItem::Label { x, y, text, .. } => Some((text.as_str(), *x, *y)),
                OverlayItem::Quad { .. } => None,
            })
            .collect()
    }

    #[test]
    fn resting_layout() {
        let chrome = Chrome::new(&ChromeConfig::default());
        let items = chrome.layout(VIEWPORT, monospace);

        assert_eq!(
            items[0],
            OverlayItem::Quad {
                rect: Rect::new(0.0, 0.0, 800.0, 72.0),
                color: chrome.nav_background,
            }
        );

        let labels = labels(&items);
        let names: Vec<_> = labels.iter().map(|l| l.0).collect();
        assert_eq!(names, ["Sphere", "Explore", "Create", "Give it a spin"]);

        // "Create" ends at the right padding; "Explore" sits one gap before it.
        assert_eq!(labels[2].1, 800.0 - 32.0 - 60.0);
        assert_eq!(labels[1].1, labels[2].1 - 32.0 - 70.0);

        // Title is centered horizontally.
        assert_eq!(labels[3].1, (800.0 - 14.0 * 20.0) / 2.0);
    }

    #[test]
    fn nav_offset_moves_bar_by_its_height() {
        let mut chrome = Chrome::new(&ChromeConfig::default());
        chrome.nav_offset = -0.5;
        assert_eq!(chrome.nav_rect(VIEWPORT).y, -36.0);
    }

    #[test]
    fn hidden_chrome_emits_nothing() {
        let mut chrome = Chrome::new(&ChromeConfig::default());
        chrome.nav_offset = -1.0;
        chrome.title_opacity = 0.0;
        assert!(chrome.layout(VIEWPORT, monospace).is_empty());
    }

    #[test]
    fn title_alpha_follows_opacity() {
        let mut chrome = Chrome::new(&ChromeConfig::default());
        chrome.title_opacity = 0.25;
        let title = chrome
            .layout(VIEWPORT, monospace)
            .into_iter()
            .find_map(|item| match item {
                OverlayItem::Label {
                    style: TextStyle::Title,
                    color,
                    ..
                } => Some(color),
                _ => None,
            })
            .unwrap();
        assert_eq!(title.a, 0.25);
    }
}
