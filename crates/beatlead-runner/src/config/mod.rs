pub mod params;
pub mod schema;

pub use params::{ParamDef, Params};
pub use schema::{
    BrowserConfig, Config, OnFailure, OutputConfig, RetryConfig, SearchConfig, Selectors, Sites,
    Timing, Viewport,
};
