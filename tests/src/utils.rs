use std::sync::Once;

use celery_script_ast::{
    arena::Tree,
    builder::TreeBuilder,
    nodes::{LeafValue, Value, ValueType},
};
use celery_script_checker::corpus::{Corpus, CorpusBuilder};

static TRACING: Once = Once::new();

/// Installs a `RUST_LOG`-driven subscriber once per test binary.
pub(crate) fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub(crate) const MESSAGE_TYPES: &[&str] = &["success", "busy", "warn", "error", "info", "fun"];
pub(crate) const CHANNELS: &[&str] = &["ticker", "toast", "email", "espeak"];

/// A trimmed down FarmBot corpus.
pub(crate) fn farmbot_corpus() -> Corpus {
    CorpusBuilder::new()
        .node(
            "sequence",
            &[],
            &["move_absolute", "move_to", "wait", "send_message"],
        )
        .node("move_absolute", &["x", "y", "z", "speed"], &[])
        .node("move_to", &["location", "speed"], &[])
        .node("coordinate", &["x", "y", "z"], &[])
        .node("point", &["pointer_id"], &[])
        .node("wait", &["milliseconds"], &[])
        .node("send_message", &["message", "message_type"], &["channel"])
        .node("channel", &["channel_name"], &[])
        .arg("coordinate", ValueType::NUMERIC)
        .arg("x", ValueType::NUMERIC)
        .arg("y", ValueType::NUMERIC)
        .arg("z", ValueType::NUMERIC)
        .arg_with("speed", ValueType::NUMERIC, speed_in_range)
        .arg("milliseconds", &[ValueType::Integer])
        .arg("message", &[ValueType::String])
        .arg_with("message_type", &[ValueType::String], |value, _| {
            one_of("message_type", value, MESSAGE_TYPES)
        })
        .arg_with("channel_name", &[ValueType::String], |value, _| {
            one_of("channel_name", value, CHANNELS)
        })
        .arg_with("location", &[], location_is_placeable)
        .arg("pointer_id", &[ValueType::Integer])
        .build()
        .expect("fixture corpus is well formed")
}

fn speed_in_range(value: Value<'_>, _corpus: &Corpus) -> Result<(), String> {
    let speed = value.as_leaf().and_then(|leaf| leaf.value().as_f64());
    match speed {
        Some(speed) if (1.0..=100.0).contains(&speed) => Ok(()),
        _ => Err("speed must be between 1 and 100".to_string()),
    }
}

fn one_of(arg: &str, value: Value<'_>, allowed: &[&str]) -> Result<(), String> {
    let text = value.as_leaf().and_then(|leaf| leaf.value().as_str());
    match text {
        Some(text) if allowed.contains(&text) => Ok(()),
        Some(text) => Err(format!(
            "'{text}' is not a valid {arg}. Allowed values: {}",
            allowed.join(", ")
        )),
        None => Err(format!("{arg} must be a string")),
    }
}

/// A location must be a node the corpus knows how to place in space.
fn location_is_placeable(value: Value<'_>, corpus: &Corpus) -> Result<(), String> {
    let Some(node) = value.as_node() else {
        return Err("location must be a node, got a leaf".to_string());
    };
    let placeable = ["coordinate", "point"];
    if placeable.contains(&node.kind()) && corpus.fetch_node(node.kind()).is_ok() {
        Ok(())
    } else {
        Err(format!(
            "location must be one of: {}, got '{}'",
            placeable.join(", "),
            node.kind()
        ))
    }
}

/// `move_absolute(x, y, z, speed)` with every value a `coordinate` leaf.
pub(crate) fn move_absolute(
    x: impl Into<LeafValue>,
    y: impl Into<LeafValue>,
    z: impl Into<LeafValue>,
    speed: impl Into<LeafValue>,
) -> Tree {
    let mut builder = TreeBuilder::new("move_absolute");
    let root = builder.root();
    builder.add_leaf_arg(root, "x", "coordinate", x);
    builder.add_leaf_arg(root, "y", "coordinate", y);
    builder.add_leaf_arg(root, "z", "coordinate", z);
    builder.add_leaf_arg(root, "speed", "coordinate", speed);
    builder.build()
}

/// A sequence exercising node-valued arguments, nested bodies and predicates.
pub(crate) fn sample_sequence() -> Tree {
    let mut builder = TreeBuilder::new("sequence");
    let root = builder.root();

    let mv = builder.add_body(root, "move_absolute");
    for (name, value) in [("x", 1), ("y", 2), ("z", 3), ("speed", 100)] {
        builder.add_leaf_arg(mv, name, "coordinate", value);
    }

    let wait = builder.add_body(root, "wait");
    builder.add_leaf_arg(wait, "milliseconds", "milliseconds", 250);

    let move_to = builder.add_body(root, "move_to");
    let location = builder.add_node_arg(move_to, "location", "coordinate");
    builder.add_leaf_arg(location, "x", "x", 1.5);
    builder.add_leaf_arg(location, "y", "y", 2.5);
    builder.add_leaf_arg(location, "z", "z", 0);
    builder.add_leaf_arg(move_to, "speed", "speed", 50);

    let message = builder.add_body(root, "send_message");
    builder.add_leaf_arg(message, "message", "message", "Watering done");
    builder.add_leaf_arg(message, "message_type", "message_type", "success");
    let channel = builder.add_body(message, "channel");
    builder.add_leaf_arg(channel, "channel_name", "channel_name", "toast");

    builder.build()
}
