//! Count-prefixed lists of entities, like `{"count": 2, "step": [...]}`.
use serde_json::{Map, Value};
use snafu::{ResultExt, ensure};
use tracing::{Level, instrument};

use crate::{
    entity::Entity,
    error::{
        CountMismatchSnafu, DecodeError, DecodeItemSnafu, EncodeError, MalformedEnvelopeSnafu,
        ReencodeSnafu, SerializeSnafu,
    },
    registry::VariantRegistry,
};

type Result<T, E = DecodeError> = std::result::Result<T, E>;

const COUNT_KEY: &str = "count";

/// Decodes a collection envelope whose items are listed under `item_key`.
///
/// Every item is serialized back into bytes and decoded through `registry`,
/// the result preserves the order of the items. A missing `count` is treated
/// as zero, and a missing or `null` item list as empty. If the declared count
/// differs from the number of items the whole collection is rejected, as is
/// the case if any single item fails to decode.
#[instrument(level = Level::DEBUG, skip(bytes, registry), fields(kind = registry.kind()))]
pub fn decode_collection<T>(
    bytes: &[u8],
    item_key: &str,
    registry: &VariantRegistry<T>,
) -> Result<Vec<T>> {
    let mut envelope: Map<String, Value> =
        serde_json::from_slice(bytes).context(MalformedEnvelopeSnafu)?;

    let declared = match envelope.remove(COUNT_KEY) {
        None | Some(Value::Null) => 0,
        Some(count) => {
            serde_json::from_value::<usize>(count).context(MalformedEnvelopeSnafu)?
        }
    };
    let items = match envelope.remove(item_key) {
        None | Some(Value::Null) => Vec::new(),
        Some(items) => {
            serde_json::from_value::<Vec<Value>>(items).context(MalformedEnvelopeSnafu)?
        }
    };

    ensure!(
        declared == items.len(),
        CountMismatchSnafu {
            declared,
            actual: items.len(),
            item_key,
        }
    );

    let entities = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let item_bytes = serde_json::to_vec(item).context(ReencodeSnafu { index })?;
            registry
                .decode(&item_bytes)
                .context(DecodeItemSnafu {
                    index,
                    id: item_id(item),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(count = entities.len(), "decoded collection");
    Ok(entities)
}

/// Encodes `items` into a collection envelope, listing them under `item_key`.
/// The count is always written.
pub fn encode_collection<E: Entity>(
    item_key: &str,
    items: &[E],
) -> Result<Vec<u8>, EncodeError> {
    let items = items
        .iter()
        .map(|item| serde_json::to_value(item.serializable()))
        .collect::<Result<Vec<_>, _>>()
        .context(SerializeSnafu { what: "collection item" })?;

    let mut envelope = Map::new();
    envelope.insert(COUNT_KEY.to_owned(), Value::from(items.len()));
    envelope.insert(item_key.to_owned(), Value::Array(items));

    serde_json::to_vec(&envelope).context(SerializeSnafu {
        what: "collection",
    })
}

fn item_id(item: &Value) -> &str {
    item.get("id").and_then(Value::as_str).unwrap_or_default()
}
