pub mod bundle;
#[cfg(feature = "cli")]
pub mod cli;
pub mod cliques;
pub mod color;
pub mod condense;
pub mod config;
pub mod graph;
pub mod layout;
pub mod membership;
pub mod normalize;
pub mod pipeline;
pub mod snapshot;

#[cfg(feature = "cli")]
pub use cli::run;

pub use bundle::RenderBundle;
pub use config::Config;
pub use graph::Graph;
pub use layout::{LayoutMode, PositionCache};
pub use pipeline::{DisplayOptions, Pipeline};
pub use snapshot::load_snapshot;
