//! Console renderers.

use ecogrid_core::Result;
use ecogrid_world::{Renderer, WorldView};
use std::io::Write;

/// Plain text grid, one row per line
pub struct TextRenderer<W> {
    out: W,
    prompt: bool,
}

impl<W: Write> TextRenderer<W> {
    /// `prompt` appends the "Press ENTER" hint after each frame
    pub fn new(out: W, prompt: bool) -> Self {
        Self { out, prompt }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, view: &WorldView) -> Result<()> {
        writeln!(self.out, "World at time {}:", view.tick)?;
        writeln!(self.out)?;
        for row in view.symbol_rows() {
            writeln!(self.out, "{row}")?;
        }
        writeln!(self.out)?;
        if self.prompt {
            writeln!(self.out, "Press ENTER to continue")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// One JSON document per frame, newline separated
pub struct JsonRenderer<W> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, view: &WorldView) -> Result<()> {
        serde_json::to_writer(&mut self.out, view)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecogrid_core::Kind;

    fn view() -> WorldView {
        WorldView {
            tick: 3,
            rows: 2,
            cols: 3,
            predators: 1,
            prey: 1,
            cells: vec![None, Some(Kind::Prey), None, Some(Kind::Predator), None, None],
        }
    }

    #[test]
    fn test_text_frame() {
        let mut renderer = TextRenderer::new(Vec::new(), true);
        renderer.render(&view()).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(
            text,
            "World at time 3:\n\n- o - \nX - - \n\nPress ENTER to continue\n"
        );
    }

    #[test]
    fn test_text_frame_without_prompt() {
        let mut renderer = TextRenderer::new(Vec::new(), false);
        renderer.render(&view()).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(text.ends_with("X - - \n\n"));
    }

    #[test]
    fn test_json_frame() {
        let mut renderer = JsonRenderer::new(Vec::new());
        renderer.render(&view()).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        let parsed: WorldView = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(parsed, view());
    }
}
