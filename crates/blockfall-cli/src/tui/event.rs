use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub(super) enum TuiEvent {
    /// The tick interval has elapsed.
    Tick,
    /// Something changed since the last frame was drawn.
    Render,
    /// Terminal events such as key input and resize.
    Crossterm(CrosstermEvent),
}
