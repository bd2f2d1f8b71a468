use std::io::Write;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde_json::{json, Value as JsonValue};

use crate::config::MastConfig;

use super::fetch::LightCurveSource;
use super::fits::read_light_curve;
use super::model::{TargetData, TargetInfo};

// ---------------------------------------------------------------------------
// MAST portal client
// ---------------------------------------------------------------------------

/// Blocking client for the MAST portal API. Resolves a TIC ID in the TIC
/// catalog, then downloads the most recent eleanor light curve for it.
pub struct MastSource {
    agent: ureq::Agent,
    base_url: String,
    provenance: String,
}

impl MastSource {
    pub fn new(config: &MastConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            provenance: config.provenance.clone(),
        }
    }

    /// Call one portal service and return its `data` rows.
    fn invoke(&self, service: &str, params: JsonValue) -> Result<Vec<JsonValue>> {
        let request = json!({
            "service": service,
            "format": "json",
            "params": params,
            "pagesize": 2000,
            "page": 1,
        });
        let url = format!("{}/api/v0/invoke", self.base_url);
        let form = request.to_string();
        log::debug!("POST {url} {form}");

        let body = self
            .agent
            .post(&url)
            .send_form(&[("request", form.as_str())])
            .with_context(|| format!("calling MAST service {service}"))?
            .into_string()
            .with_context(|| format!("reading {service} response"))?;

        parse_response(service, &body)
    }

    fn resolve_target(&self, tic: u64) -> Result<TargetInfo> {
        let rows = self
            .invoke(
                "Mast.Catalogs.Filtered.Tic",
                json!({
                    "columns": "ID,GAIA,Tmag,ra,dec",
                    "filters": [{ "paramName": "ID", "values": [tic.to_string()] }],
                }),
            )
            .context("querying TIC catalog")?;
        let row = rows
            .first()
            .with_context(|| format!("TIC {tic} not found in the TIC catalog"))?;
        parse_target(row, tic)
    }

    fn latest_observation(&self, tic: u64) -> Result<String> {
        let rows = self
            .invoke(
                "Mast.Caom.Filtered",
                json!({
                    "columns": "obsid,sequence_number,target_name",
                    "filters": [
                        { "paramName": "provenance_name", "values": [self.provenance] },
                        { "paramName": "target_name", "values": [tic.to_string()] },
                    ],
                }),
            )
            .context("searching for light curve products")?;
        latest_obsid(&rows).with_context(|| {
            format!("no {} light curve found for TIC {tic}", self.provenance)
        })
    }

    fn light_curve_uri(&self, obsid: &str) -> Result<String> {
        let rows = self
            .invoke("Mast.Caom.Products", json!({ "obsid": obsid }))
            .with_context(|| format!("listing products of observation {obsid}"))?;
        pick_light_curve(&rows)
            .with_context(|| format!("observation {obsid} has no FITS light curve"))
    }

    fn download(&self, uri: &str) -> Result<tempfile::NamedTempFile> {
        let url = format!("{}/api/v0.1/Download/file", self.base_url);
        log::debug!("GET {url}?uri={uri}");

        let response = self
            .agent
            .get(&url)
            .query("uri", uri)
            .call()
            .with_context(|| format!("downloading {uri}"))?;

        let mut file = tempfile::Builder::new()
            .prefix("tess-lc-")
            .suffix(".fits")
            .tempfile()
            .context("creating temporary file")?;
        let bytes = std::io::copy(&mut response.into_reader(), file.as_file_mut())
            .with_context(|| format!("downloading {uri}"))?;
        file.flush().context("writing temporary file")?;
        log::debug!("downloaded {bytes} bytes to {}", file.path().display());
        Ok(file)
    }
}

impl LightCurveSource for MastSource {
    fn load(&self, tic: u64) -> Result<TargetData> {
        let target = self.resolve_target(tic)?;
        let obsid = self.latest_observation(tic)?;
        let uri = self.light_curve_uri(&obsid)?;
        let file = self.download(&uri)?;
        let table = read_light_curve(file.path())?;
        Ok(table.into_target_data(target))
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

fn parse_response(service: &str, body: &str) -> Result<Vec<JsonValue>> {
    let root: JsonValue =
        serde_json::from_str(body).with_context(|| format!("parsing {service} response"))?;

    let status = root.get("status").and_then(JsonValue::as_str).unwrap_or("");
    if status != "COMPLETE" {
        let msg = root.get("msg").and_then(JsonValue::as_str).unwrap_or("");
        bail!("{service} returned status '{status}' {msg}");
    }

    Ok(root
        .get("data")
        .and_then(JsonValue::as_array)
        .cloned()
        .unwrap_or_default())
}

/// MAST serves integer IDs either as JSON numbers or as strings.
fn json_u64(val: Option<&JsonValue>) -> Option<u64> {
    match val? {
        JsonValue::Number(n) => n.as_u64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn json_f64(row: &JsonValue, key: &str) -> Result<f64> {
    row.get(key)
        .and_then(JsonValue::as_f64)
        .with_context(|| format!("TIC row has no numeric '{key}'"))
}

fn parse_target(row: &JsonValue, tic: u64) -> Result<TargetInfo> {
    Ok(TargetInfo {
        tic: json_u64(row.get("ID")).unwrap_or(tic),
        gaia: json_u64(row.get("GAIA")),
        tess_mag: json_f64(row, "Tmag")?,
        ra: json_f64(row, "ra")?,
        dec: json_f64(row, "dec")?,
    })
}

/// The observation of the highest sector.
fn latest_obsid(rows: &[JsonValue]) -> Option<String> {
    rows.iter()
        .filter_map(|row| {
            let obsid = match row.get("obsid")? {
                JsonValue::String(s) => s.clone(),
                other => other.to_string(),
            };
            let sector = json_u64(row.get("sequence_number")).unwrap_or(0);
            Some((sector, obsid))
        })
        .max_by_key(|(sector, _)| *sector)
        .map(|(_, obsid)| obsid)
}

fn pick_light_curve(rows: &[JsonValue]) -> Option<String> {
    rows.iter()
        .filter(|row| {
            row.get("productFilename")
                .and_then(JsonValue::as_str)
                .is_some_and(|name| name.to_ascii_lowercase().ends_with(".fits"))
        })
        .find_map(|row| row.get("dataURI").and_then(JsonValue::as_str))
        .map(str::to_string)
}
