use followgraph::{load_snapshot, Config, DisplayOptions, Pipeline};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProcessOptions {
    root: Option<String>,
    hide_leaves: Option<bool>,
    show_cliques: Option<bool>,
    width: Option<f64>,
    height: Option<f64>,
}

fn build_config(options: &ProcessOptions) -> Config {
    let mut config = Config::default();
    if let Some(width) = options.width {
        config.layout.width = width;
    }
    if let Some(height) = options.height {
        config.layout.height = height;
    }
    config
}

/// Run the whole pipeline over a snapshot JSON string and return the render
/// bundle as JSON for the JS force-simulation frontend.
#[wasm_bindgen]
pub fn process_graph(snapshot: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<ProcessOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        ProcessOptions::default()
    };

    let graph = load_snapshot(snapshot, options.root.as_deref())
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    let mut pipeline = Pipeline::new(graph, build_config(&options));
    let bundle = pipeline.recompute(DisplayOptions {
        hide_leaves: options.hide_leaves.unwrap_or(false),
        show_cliques: options.show_cliques.unwrap_or(false),
    });
    bundle
        .to_json(false)
        .map_err(|error| JsValue::from_str(&error.to_string()))
}
