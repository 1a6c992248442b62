use crossterm::event::Event;
use std::io::Write;

pub mod fireworks;

pub trait Effect {
    /// Terminal area in cells across and half-cells down.
    fn resize(&mut self, width: usize, height: usize);
    fn update(&mut self);
    fn render<W: Write>(&mut self, out: &mut W) -> std::io::Result<()>;
    fn handle_event(&mut self, _event: &Event) {}
}
