use crate::core::{
    bounds::Bounds, camera::CameraState, geo::LatLng, geo::LatLngBounds, map::CameraUpdate,
};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A method call as delivered by the host framework's message bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

/// Arguments of `setCenterCoordinate`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SetCenterRequest {
    /// Falls back to the control's current center
    pub target: Option<LatLng>,
    /// Falls back to the stored zoom
    pub zoom: Option<f64>,
    pub animated: Option<bool>,
}

/// Arguments of `setBounds`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SetBoundsRequest {
    /// An empty target makes the command a no-op
    pub target: Vec<LatLng>,
    /// Uniform inset, in screen points
    pub padding: f64,
    pub animated: Option<bool>,
}

/// Commands the engine understands, with optional fields left unresolved
/// until the owning view applies its defaults.
#[derive(Debug, Clone, PartialEq)]
pub enum MapCommand {
    SetCenterCoordinate(SetCenterRequest),
    SetBounds(SetBoundsRequest),
    ZoomIn {
        animated: Option<bool>,
    },
    ZoomOut {
        animated: Option<bool>,
    },
    ZoomTo {
        zoom_level: f64,
        animated: Option<bool>,
    },
    ZoomBy {
        delta: f64,
        animated: Option<bool>,
    },
    GetVisibleRegion,
    GetZoomLevel,
    GetMinMaxZoomLevels,
    SetMinMaxZoomLevels {
        min: Option<f64>,
        max: Option<f64>,
    },
    UpdateStoredCameraValues {
        zoom: Option<f64>,
        pitch: Option<f64>,
        heading: Option<f64>,
    },
}

impl MapCommand {
    /// Builds a command from a method name and its loosely typed arguments.
    ///
    /// Optional fields that are missing or of the wrong type are left unset.
    /// Coordinates outside the valid range are rejected.
    pub fn from_method_call(method: &str, arguments: &Value) -> Result<Self> {
        let method = method.strip_prefix("map#").unwrap_or(method);
        let animated = bool_field(arguments, "animated");

        let command = match method {
            "setCenterCoordinate" => Self::SetCenterCoordinate(SetCenterRequest {
                target: coordinate_field(arguments, "target")?,
                zoom: f64_field(arguments, "zoom"),
                animated,
            }),
            "setBounds" => Self::SetBounds(SetBoundsRequest {
                target: coordinate_list_field(arguments, "target")?,
                padding: f64_field(arguments, "padding").unwrap_or(0.0),
                animated,
            }),
            "zoomIn" => Self::ZoomIn { animated },
            "zoomOut" => Self::ZoomOut { animated },
            "zoomTo" => Self::ZoomTo {
                zoom_level: f64_field(arguments, "newZoomLevel").ok_or(
                    MapError::MissingArgument {
                        command: "zoomTo",
                        field: "newZoomLevel",
                    },
                )?,
                animated,
            },
            "zoomBy" => Self::ZoomBy {
                delta: f64_field(arguments, "zoomBy").ok_or(MapError::MissingArgument {
                    command: "zoomBy",
                    field: "zoomBy",
                })?,
                animated,
            },
            "getVisibleRegion" => Self::GetVisibleRegion,
            "getZoomLevel" => Self::GetZoomLevel,
            "getMinMaxZoomLevels" => Self::GetMinMaxZoomLevels,
            "setMinMaxZoomLevels" => Self::SetMinMaxZoomLevels {
                min: f64_field(arguments, "min"),
                max: f64_field(arguments, "max"),
            },
            "updateStoredCameraValues" => Self::UpdateStoredCameraValues {
                zoom: f64_field(arguments, "zoom"),
                pitch: f64_field(arguments, "pitch"),
                heading: f64_field(arguments, "heading"),
            },
            other => return Err(MapError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }

    pub fn from_call(call: &MethodCall) -> Result<Self> {
        Self::from_method_call(&call.method, &call.arguments)
    }

    /// Parses one `{"method": ..., "arguments": ...}` JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let call: MethodCall = serde_json::from_str(json)?;
        Self::from_call(&call)
    }
}

fn f64_field(arguments: &Value, key: &str) -> Option<f64> {
    let value = arguments.get(key)?;
    let number = value.as_f64();
    if number.is_none() && !value.is_null() {
        log::warn!("ignoring non-numeric `{}`: {}", key, value);
    }
    number
}

fn bool_field(arguments: &Value, key: &str) -> Option<bool> {
    let value = arguments.get(key)?;
    let flag = value.as_bool();
    if flag.is_none() && !value.is_null() {
        log::warn!("ignoring non-boolean `{}`: {}", key, value);
    }
    flag
}

/// `[lat, lng]`, or `None` when the value is not a numeric pair.
fn parse_coordinate(value: &Value) -> Option<LatLng> {
    let values: Vec<f64> = value
        .as_array()?
        .iter()
        .map(Value::as_f64)
        .collect::<Option<_>>()?;
    LatLng::from_slice(&values)
}

fn checked(coordinate: LatLng) -> Result<LatLng> {
    if coordinate.is_valid() {
        Ok(coordinate)
    } else {
        Err(MapError::InvalidCoordinates(format!(
            "[{}, {}] is outside [-90, 90] x [-180, 180]",
            coordinate.lat, coordinate.lng
        )))
    }
}

fn coordinate_field(arguments: &Value, key: &str) -> Result<Option<LatLng>> {
    let Some(value) = arguments.get(key) else {
        return Ok(None);
    };
    match parse_coordinate(value) {
        Some(coordinate) => checked(coordinate).map(Some),
        None => {
            log::warn!("ignoring malformed `{}`: {}", key, value);
            Ok(None)
        }
    }
}

fn coordinate_list_field(arguments: &Value, key: &str) -> Result<Vec<LatLng>> {
    let Some(values) = arguments.get(key).and_then(Value::as_array) else {
        return Ok(Vec::new());
    };
    values
        .iter()
        .filter_map(|value| {
            let coordinate = parse_coordinate(value);
            if coordinate.is_none() {
                log::warn!("dropping malformed coordinate in `{}`: {}", key, value);
            }
            coordinate
        })
        .map(checked)
        .collect()
}

/// Structured reply handed back to the host
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MapReply {
    None,
    Applied(bool),
    ZoomLevel(f64),
    ZoomLevels([f64; 2]),
    VisibleRegion(LatLngBounds),
    MapRect(Bounds),
    CameraUpdate(CameraUpdate),
    Camera(CameraState),
}

impl MapReply {
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
