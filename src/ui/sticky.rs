/// Bottom call-to-action bar, shown once the viewer scrolls past the hero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickyBar {
    /// Offset of the hero section's bottom edge, px
    hero_bottom: f64,
    visible: bool,
}

impl StickyBar {
    pub fn new(hero_bottom: f64) -> Self {
        Self {
            hero_bottom,
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Recompute visibility. Returns the new state if it changed.
    pub fn update(&mut self, scroll_y: f64, viewport_height: f64) -> Option<bool> {
        let visible = scroll_y + viewport_height > self.hero_bottom;
        if visible == self.visible {
            return None;
        }
        self.visible = visible;
        Some(visible)
    }
}
