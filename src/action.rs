use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const ADD_TODO: &str = "todos/ADD_TODO";
pub const TOGGLE_TODO: &str = "todos/TOGGLE_TODO";
pub const REMOVE_TODO: &str = "todos/REMOVE_TODO";
pub const INCREASE: &str = "counter/INCREASE";
pub const DECREASE: &str = "counter/DECREASE";
pub const INCREASE_BY: &str = "counter/INCREASE_BY";

/// Actions handled by the `todos` slice.
///
/// Serialized as `{"type": "todos/...", "payload": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum TodoAction {
    /// Append a new todo with the given text.
    #[serde(rename = "todos/ADD_TODO")]
    Add(String),
    /// Flip `done` on the todo with this id.
    #[serde(rename = "todos/TOGGLE_TODO")]
    Toggle(u64),
    /// Drop the todo with this id.
    #[serde(rename = "todos/REMOVE_TODO")]
    Remove(u64),
}

impl TodoAction {
    pub fn action_type(&self) -> &'static str {
        match self {
            TodoAction::Add(_) => ADD_TODO,
            TodoAction::Toggle(_) => TOGGLE_TODO,
            TodoAction::Remove(_) => REMOVE_TODO,
        }
    }
}

/// Actions handled by the `counter` slice.
///
/// `Increase` and `Decrease` carry no payload and serialize without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum CounterAction {
    #[serde(rename = "counter/INCREASE")]
    Increase,
    #[serde(rename = "counter/DECREASE")]
    Decrease,
    #[serde(rename = "counter/INCREASE_BY")]
    IncreaseBy(i64),
}

impl CounterAction {
    pub fn action_type(&self) -> &'static str {
        match self {
            CounterAction::Increase => INCREASE,
            CounterAction::Decrease => DECREASE,
            CounterAction::IncreaseBy(_) => INCREASE_BY,
        }
    }
}

/// An action whose tag no slice recognizes.
///
/// Kept as-is so foreign actions still flow through every reducer (and hit
/// the identity arm). Fields other than `type` and `payload` are carried in
/// [`RawAction::extra`], so the JSON form survives a decode/encode cycle.
///
/// A `RawAction` never carries one of the recognized tags: [`RawAction::new`]
/// rejects them and decoding routes them to their typed variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawAction {
    #[serde(rename = "type")]
    action_type: String,

    #[serde(skip_serializing_if = "Value::is_null")]
    payload: Value,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl RawAction {
    /// Create a foreign action with the given tag and payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservedActionType`] if `action_type` is one of the
    /// tags owned by a slice; build those with the action creators instead.
    pub fn new(action_type: impl Into<String>, payload: Value) -> Result<Self> {
        let action_type = action_type.into();
        if is_known_action_type(&action_type) {
            return Err(Error::ReservedActionType(action_type));
        }
        Ok(RawAction {
            action_type,
            payload,
            extra: Map::new(),
        })
    }

    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    /// The payload, `null` when absent.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Top-level fields besides `type` and `payload`.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

/// Returns `true` for tags that decode to a typed slice action.
pub fn is_known_action_type(action_type: &str) -> bool {
    matches!(
        action_type,
        ADD_TODO | TOGGLE_TODO | REMOVE_TODO | INCREASE | DECREASE | INCREASE_BY
    )
}

#[derive(Deserialize)]
struct WireAction {
    #[serde(rename = "type")]
    action_type: String,
    #[serde(default)]
    payload: Value,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// The root action type dispatched to the application store.
///
/// Every reducer receives every action and matches only the variants it
/// owns. The serialized form is the flat `{"type", "payload"}` record; the
/// slice wrapper does not appear on the wire.
///
/// # Examples
///
/// ```
/// use statefold::{add_todo, Action, TodoAction};
///
/// let action = add_todo("write docs");
/// assert_eq!(action, Action::Todos(TodoAction::Add("write docs".into())));
/// assert_eq!(action.action_type(), "todos/ADD_TODO");
///
/// let json = action.to_json().unwrap();
/// assert_eq!(json, r#"{"type":"todos/ADD_TODO","payload":"write docs"}"#);
/// assert_eq!(Action::from_json(&json).unwrap(), action);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Action {
    Todos(TodoAction),
    Counter(CounterAction),
    Other(RawAction),
}

impl Action {
    /// Returns the wire tag of this action (e.g. `"todos/ADD_TODO"`).
    pub fn action_type(&self) -> &str {
        match self {
            Action::Todos(action) => action.action_type(),
            Action::Counter(action) => action.action_type(),
            Action::Other(raw) => raw.action_type(),
        }
    }

    /// Decode an action from its JSON form.
    ///
    /// Unrecognized tags decode to [`Action::Other`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedAction`] if the document is not an object
    /// with a string `type`, or [`Error::InvalidPayload`] if a recognized tag
    /// carries a payload of the wrong shape.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Action::from_value(value)
    }

    /// Decode an action from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Same as [`Action::from_json`].
    pub fn from_value(value: Value) -> Result<Self> {
        match value.get("type") {
            Some(Value::String(_)) => {}
            Some(other) => {
                return Err(Error::MalformedAction(format!(
                    "`type` must be a string, got {other}"
                )));
            }
            None => {
                return Err(Error::MalformedAction(
                    "expected an object with a `type` field".to_string(),
                ));
            }
        }
        let wire: WireAction = serde_json::from_value(value)?;
        Action::from_wire(wire)
    }

    /// Encode this action as a single-line JSON record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if an `Other` payload cannot be serialized.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Action {
    /// Route a decoded record to its typed variant. Extra fields on a
    /// recognized action are dropped.
    fn from_wire(wire: WireAction) -> Result<Self> {
        match wire.action_type.as_str() {
            ADD_TODO | TOGGLE_TODO | REMOVE_TODO => {
                decode_known(wire.action_type, wire.payload).map(Action::Todos)
            }
            INCREASE | DECREASE | INCREASE_BY => {
                decode_known(wire.action_type, wire.payload).map(Action::Counter)
            }
            _ => Ok(Action::Other(RawAction {
                action_type: wire.action_type,
                payload: wire.payload,
                extra: wire.extra,
            })),
        }
    }
}

fn decode_known<T: DeserializeOwned>(action_type: String, payload: Value) -> Result<T> {
    let mut doc = Map::new();
    doc.insert("type".to_string(), Value::String(action_type.clone()));
    if !payload.is_null() {
        doc.insert("payload".to_string(), payload);
    }
    serde_json::from_value(Value::Object(doc)).map_err(|source| Error::InvalidPayload {
        action_type,
        source,
    })
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let wire = WireAction::deserialize(deserializer)?;
        Action::from_wire(wire).map_err(serde::de::Error::custom)
    }
}

impl From<TodoAction> for Action {
    fn from(action: TodoAction) -> Self {
        Action::Todos(action)
    }
}

impl From<CounterAction> for Action {
    fn from(action: CounterAction) -> Self {
        Action::Counter(action)
    }
}

/// Create an action that appends a todo. Empty text is accepted.
pub fn add_todo(text: impl Into<String>) -> Action {
    Action::Todos(TodoAction::Add(text.into()))
}

/// Create an action that flips `done` on the todo with `id`.
pub fn toggle_todo(id: u64) -> Action {
    Action::Todos(TodoAction::Toggle(id))
}

/// Create an action that removes the todo with `id`.
pub fn remove_todo(id: u64) -> Action {
    Action::Todos(TodoAction::Remove(id))
}

pub fn increase() -> Action {
    Action::Counter(CounterAction::Increase)
}

pub fn decrease() -> Action {
    Action::Counter(CounterAction::Decrease)
}

pub fn increase_by(diff: i64) -> Action {
    Action::Counter(CounterAction::IncreaseBy(diff))
}
