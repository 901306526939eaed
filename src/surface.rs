use crate::sprites::SpriteFrame;
use crate::util::Rect;

/// Immediate-mode 2D drawing. The simulation never touches pixels itself.
pub trait Surface {
    fn draw_sprite(&mut self, frame: &SpriteFrame, dst: Rect);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_px: u32, color: &str);
    fn fill_rect(&mut self, rect: Rect, color: &str);
    fn stroke_rect(&mut self, rect: Rect, color: &str);
    fn clear_rect(&mut self, rect: Rect);
}

/// The three stacked canvases, back to front.
pub struct Layers<'a> {
    pub background: &'a mut dyn Surface,
    pub game: &'a mut dyn Surface,
    pub ui: &'a mut dyn Surface,
}

#[cfg(test)]
pub mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Sprite { frame: SpriteFrame, dst: Rect },
        Text { text: String, x: f64, y: f64 },
        Fill(Rect),
        Stroke(Rect),
        Clear(Rect),
    }

    /// Remembers every call so tests can inspect what a frame drew.
    #[derive(Default)]
    pub struct RecordingSurface {
        pub calls: Vec<DrawCall>,
    }

    impl RecordingSurface {
        pub fn texts(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    DrawCall::Text { text, .. } => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }

        pub fn has_text(&self, needle: &str) -> bool {
            self.texts().iter().any(|t| t.contains(needle))
        }
    }

    impl Surface for RecordingSurface {
        fn draw_sprite(&mut self, frame: &SpriteFrame, dst: Rect) {
            self.calls.push(DrawCall::Sprite { frame: *frame, dst });
        }

        fn fill_text(&mut self, text: &str, x: f64, y: f64, _font_px: u32, _color: &str) {
            self.calls.push(DrawCall::Text { text: text.to_string(), x, y });
        }

        fn fill_rect(&mut self, rect: Rect, _color: &str) {
            self.calls.push(DrawCall::Fill(rect));
        }

        fn stroke_rect(&mut self, rect: Rect, _color: &str) {
            self.calls.push(DrawCall::Stroke(rect));
        }

        fn clear_rect(&mut self, rect: Rect) {
            self.calls.push(DrawCall::Clear(rect));
        }
    }

    /// Owns one recording surface per layer.
    #[derive(Default)]
    pub struct RecordingLayers {
        pub background: RecordingSurface,
        pub game: RecordingSurface,
        pub ui: RecordingSurface,
    }

    impl RecordingLayers {
        pub fn layers(&mut self) -> Layers<'_> {
            Layers {
                background: &mut self.background,
                game: &mut self.game,
                ui: &mut self.ui,
            }
        }

        pub fn clear(&mut self) {
            self.background.calls.clear();
            self.game.calls.clear();
            self.ui.calls.clear();
        }
    }
}
