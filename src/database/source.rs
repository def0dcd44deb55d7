//! Bulk fetch operations backing the report processor.

use crate::database::helpers::{
    business_hour_rule_from_row, placeholders, status_observation_from_row, MAX_IN_LIST,
};
use crate::database::traits::StoreDataSource;
use crate::database::Database;
use crate::errors::AppResult;
use crate::types::{BusinessHourRule, StatusObservation};
use crate::utils::time::{from_micros, to_micros};
use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, OptionalExtension};
use std::collections::HashMap;
use tracing::debug;

impl StoreDataSource for Database {
    /// Stores appearing in any source table; a store with only polls or only
    /// hours still gets a report row.
    fn fetch_stores(&self) -> AppResult<Vec<String>> {
        let mut stmt = self.connection().prepare(
            r#"
            SELECT store_id FROM stores
            UNION
            SELECT DISTINCT store_id FROM store_status
            UNION
            SELECT DISTINCT store_id FROM business_hours
            ORDER BY store_id
            "#,
        )?;

        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Fetched {} store ids", ids.len());
        Ok(ids)
    }

    fn fetch_timezones(&self, store_ids: &[String]) -> AppResult<HashMap<String, String>> {
        let mut timezones = HashMap::with_capacity(store_ids.len());

        for chunk in store_ids.chunks(MAX_IN_LIST) {
            let sql = format!(
                "SELECT store_id, timezone_str FROM stores \
                 WHERE store_id IN ({}) AND timezone_str IS NOT NULL AND timezone_str != ''",
                placeholders(chunk.len())
            );
            let mut stmt = self.connection().prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(chunk.iter()), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;
            for row in rows {
                let (store_id, timezone) = row?;
                timezones.insert(store_id, timezone);
            }
        }

        Ok(timezones)
    }

    fn fetch_business_hours(
        &self,
        store_ids: &[String],
    ) -> AppResult<HashMap<String, Vec<BusinessHourRule>>> {
        let mut hours: HashMap<String, Vec<BusinessHourRule>> = HashMap::new();

        for chunk in store_ids.chunks(MAX_IN_LIST) {
            let sql = format!(
                "SELECT store_id, day_of_week, start_time_local, end_time_local \
                 FROM business_hours WHERE store_id IN ({}) ORDER BY store_id, day_of_week, id",
                placeholders(chunk.len())
            );
            let mut stmt = self.connection().prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(chunk.iter()), business_hour_rule_from_row)?;
            for row in rows {
                let rule = row?;
                hours.entry(rule.store_id.clone()).or_default().push(rule);
            }
        }

        Ok(hours)
    }

    fn fetch_status_observations(
        &self,
        store_ids: &[String],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> AppResult<HashMap<String, Vec<StatusObservation>>> {
        let mut observations: HashMap<String, Vec<StatusObservation>> = HashMap::new();
        let mut total = 0usize;

        for chunk in store_ids.chunks(MAX_IN_LIST) {
            let n = chunk.len();
            let sql = format!(
                "SELECT store_id, timestamp_utc, status FROM store_status \
                 WHERE store_id IN ({}) AND timestamp_utc >= ?{} AND timestamp_utc <= ?{} \
                 ORDER BY store_id, timestamp_utc, id",
                placeholders(n),
                n + 1,
                n + 2
            );

            let mut params: Vec<Value> = chunk.iter().map(|id| Value::Text(id.clone())).collect();
            params.push(Value::Integer(to_micros(range_start)));
            params.push(Value::Integer(to_micros(range_end)));

            let mut stmt = self.connection().prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(params.iter()), status_observation_from_row)?;
            for row in rows {
                let observation = row?;
                total += 1;
                observations
                    .entry(observation.store_id.clone())
                    .or_default()
                    .push(observation);
            }
        }

        debug!(
            "Fetched {} observations for {} stores",
            total,
            observations.len()
        );
        Ok(observations)
    }

    fn latest_observation_timestamp(&self) -> AppResult<Option<DateTime<Utc>>> {
        let micros: Option<i64> = self
            .connection()
            .query_row("SELECT MAX(timestamp_utc) FROM store_status", [], |row| {
                row.get::<_, Option<i64>>(0)
            })
            .optional()?
            .flatten();

        Ok(micros.and_then(from_micros))
    }
}
