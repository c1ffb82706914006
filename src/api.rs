//! Typed calls for each backend endpoint the dashboard uses.

use crate::charts::{ChartSeries, ChartSpec, TOP_CHATTERS, USERS};
use crate::client::JsonClient;
use crate::envelope::{UpdateEnvelope, UpdateOutcome};
use crate::errors::ClientError;
use crate::models::{CommandFields, CommandRow, RequestDescriptor};
use serde_json::{Value, json};

pub const UPDATE: &str = "/api/update";
pub const COMMANDS: &str = "/api/commands";
pub const COMMAND: &str = "/api/command";
pub const CHATTERS_STATS: &str = "/api/chatters_stats";
pub const USERS_STATS: &str = "/api/users_stats";
pub const RPG_EVENT: &str = "/api/rpg";

pub fn events_stats_path(id: &str) -> String {
    format!("/api/events_stats/{id}")
}

pub fn rpg_events_path(id: &str) -> String {
    format!("/api/rpg/events/{id}")
}

pub fn events_by_type_path(kind: &str, id: &str) -> String {
    format!("/api/events/{kind}/{id}")
}

/// The stats and export endpoints answer with a JSON string holding the real
/// document. Unwraps one such layer; any other value is returned unchanged.
pub fn decode_embedded(value: Value) -> Result<Value, ClientError> {
    match value {
        Value::String(text) => serde_json::from_str(&text).map_err(ClientError::Decode),
        other => Ok(other),
    }
}

pub fn chart_series(value: Value) -> Result<ChartSeries, ClientError> {
    ChartSeries::from_value(&decode_embedded(value)?)
}

impl JsonClient {
    pub async fn update(&self, envelope: &UpdateEnvelope) -> Result<UpdateOutcome, ClientError> {
        let descriptor = RequestDescriptor::post_json(UPDATE, envelope)?;
        let value = self.send_request(&descriptor).await?;
        Ok(UpdateOutcome::from_response(value))
    }

    pub async fn commands(&self) -> Result<Vec<CommandRow>, ClientError> {
        self.send_request_records(&RequestDescriptor::get(COMMANDS)).await
    }

    pub async fn command(&self, name: &str) -> Result<CommandFields, ClientError> {
        let descriptor = RequestDescriptor::post(COMMAND, json!({ "command": name }));
        self.send_request_record(&descriptor).await
    }

    /// Data for one of the dashboard's charts.
    pub async fn chart(&self, spec: &ChartSpec) -> Result<ChartSeries, ClientError> {
        let value = self.send_request(&RequestDescriptor::get(spec.endpoint)).await?;
        let series = chart_series(value)?;
        if spec == &TOP_CHATTERS {
            return Ok(series.with_chatters_palette());
        }
        Ok(series)
    }

    pub async fn chatters_stats(&self) -> Result<ChartSeries, ClientError> {
        self.chart(&TOP_CHATTERS).await
    }

    pub async fn users_stats(&self) -> Result<ChartSeries, ClientError> {
        self.chart(&USERS).await
    }

    pub async fn events_stats(&self, id: &str) -> Result<ChartSeries, ClientError> {
        let value = self
            .send_request(&RequestDescriptor::get(events_stats_path(id)))
            .await?;
        chart_series(value)
    }

    pub async fn events_by_type(&self, kind: &str, id: &str) -> Result<ChartSeries, ClientError> {
        let value = self
            .send_request(&RequestDescriptor::get(events_by_type_path(kind, id)))
            .await?;
        chart_series(value)
    }

    pub async fn rpg_events(&self, id: &str) -> Result<Value, ClientError> {
        let value = self
            .send_request(&RequestDescriptor::get(rpg_events_path(id)))
            .await?;
        decode_embedded(value)
    }

    pub async fn rpg_event(&self, id: &str) -> Result<Value, ClientError> {
        let descriptor = RequestDescriptor::post(RPG_EVENT, json!({ "rpg": id }));
        self.send_request(&descriptor).await
    }
}
