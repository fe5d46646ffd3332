/// Startup failures.  Nothing in the per-frame path can fail except
/// terminal I/O, which ends the session.

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Terminal setup, rendering or event I/O failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A `GameConfig` describes an impossible layout
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Terminal too small: {cols}x{rows}, need at least {min_cols}x{min_rows}")]
    TerminalTooSmall {
        cols: u16,
        rows: u16,
        min_cols: u16,
        min_rows: u16,
    },
}
