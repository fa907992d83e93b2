use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

pub const ENTITY_SET: &str = "CovidDailies";
pub const NAVIGATION: &str = "CountryRegion";

const SCALAR_FIELDS: [&str; 3] = ["id", "personConfirmed", "personDeath"];
const REGION_FIELDS: [&str; 2] = ["id", "countryName"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRegion {
    pub id: i64,
    #[serde(rename = "countryName")]
    pub country_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CovidDaily {
    pub id: i64,
    #[serde(rename = "personConfirmed")]
    pub person_confirmed: u64,
    #[serde(rename = "personDeath")]
    pub person_death: u64,
    #[serde(rename = "CountryRegion")]
    pub country_region: CountryRegion,
}

#[derive(Deserialize)]
pub struct CreateDaily {
    #[serde(rename = "personConfirmed", default)]
    pub person_confirmed: u64,
    #[serde(rename = "personDeath", default)]
    pub person_death: u64,
    #[serde(rename = "countryName")]
    pub country_name: String,
}

#[derive(Deserialize)]
pub struct UpdateDaily {
    #[serde(rename = "personConfirmed")]
    pub person_confirmed: Option<u64>,
    #[serde(rename = "personDeath")]
    pub person_death: Option<u64>,
}

/// OData system query options understood by the collection endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ODataQuery {
    #[serde(rename = "$select")]
    pub select: Option<String>,
    #[serde(rename = "$expand")]
    pub expand: Option<String>,
}

/// Rows in insertion order plus id counters.
#[derive(Debug, Default)]
pub struct Table {
    rows: Vec<CovidDaily>,
    regions: Vec<CountryRegion>,
    next_id: i64,
}

impl Table {
    pub fn with_rows(seed: Vec<(u64, u64, &str)>) -> Self {
        let mut table = Table::default();
        for (confirmed, deaths, country) in seed {
            table.insert(confirmed, deaths, country);
        }
        table
    }

    fn region(&mut self, name: &str) -> CountryRegion {
        if let Some(region) = self.regions.iter().find(|r| r.country_name == name) {
            return region.clone();
        }
        let region = CountryRegion {
            id: self.regions.len() as i64 + 1,
            country_name: name.to_string(),
        };
        self.regions.push(region.clone());
        region
    }

    fn insert(&mut self, confirmed: u64, deaths: u64, country: &str) -> CovidDaily {
        self.next_id += 1;
        let daily = CovidDaily {
            id: self.next_id,
            person_confirmed: confirmed,
            person_death: deaths,
            country_region: self.region(country),
        };
        self.rows.push(daily.clone());
        daily
    }
}

pub type Db = Arc<RwLock<Table>>;

pub fn app() -> Router {
    app_with(Table::default())
}

pub fn app_with(table: Table) -> Router {
    let db: Db = Arc::new(RwLock::new(table));
    Router::new()
        .route("/odata/CovidDailies", get(list_dailies).post(create_daily))
        .route(
            "/odata/CovidDailies/{id}",
            patch(update_daily).delete(delete_daily),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, table: Table) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(table)).await
}

/// A handful of countries with several days each, in a fixed order.
pub fn demo_dataset() -> Table {
    Table::with_rows(vec![
        (120_000, 1_500, "France"),
        (45_000, 900, "Germany"),
        (80_000, 1_100, "France"),
        (2_400_000, 61_000, "United States"),
        (30_000, 400, "Germany"),
        (9_000_000, 150_000, "India"),
        (1_600_000, 45_000, "United States"),
        (3_000, 12, "Iceland"),
    ])
}

/// Parsed `$select` / `$expand`.
struct Projection {
    fields: Vec<String>,
    region: Option<Vec<String>>,
}

impl Projection {
    fn parse(query: &ODataQuery) -> Result<Self, String> {
        let fields = match &query.select {
            Some(list) => split_fields(list, &SCALAR_FIELDS)?,
            None => SCALAR_FIELDS.iter().map(|f| f.to_string()).collect(),
        };
        let region = match query.expand.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(expand) => Some(parse_expand(expand)?),
        };
        Ok(Self { fields, region })
    }

    fn apply(&self, daily: &CovidDaily) -> Value {
        let mut obj = Map::new();
        for field in &self.fields {
            let value = match field.as_str() {
                "id" => Value::from(daily.id),
                "personConfirmed" => Value::from(daily.person_confirmed),
                _ => Value::from(daily.person_death),
            };
            obj.insert(field.clone(), value);
        }
        if let Some(region_fields) = &self.region {
            let mut region = Map::new();
            for field in region_fields {
                let value = match field.as_str() {
                    "id" => Value::from(daily.country_region.id),
                    _ => Value::from(daily.country_region.country_name.clone()),
                };
                region.insert(field.clone(), value);
            }
            obj.insert(NAVIGATION.to_string(), Value::Object(region));
        }
        Value::Object(obj)
    }
}

fn split_fields(list: &str, known: &[&str]) -> Result<Vec<String>, String> {
    list.split(',')
        .map(str::trim)
        .map(|field| {
            if known.contains(&field) {
                Ok(field.to_string())
            } else {
                Err(format!("unknown property '{field}'"))
            }
        })
        .collect()
}

/// Accepts `CountryRegion` or `CountryRegion($select=a,b)`.
fn parse_expand(expand: &str) -> Result<Vec<String>, String> {
    let Some(rest) = expand.strip_prefix(NAVIGATION) else {
        return Err(format!("unknown navigation property in '{expand}'"));
    };
    let rest = rest.trim();
    if rest.is_empty() {
        return Ok(REGION_FIELDS.iter().map(|f| f.to_string()).collect());
    }
    let inner = rest
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .ok_or_else(|| format!("malformed expand options in '{expand}'"))?;
    let list = inner
        .strip_prefix("$select=")
        .ok_or_else(|| format!("unsupported expand option '{inner}'"))?;
    split_fields(list, &REGION_FIELDS)
}

fn context() -> String {
    format!("$metadata#{ENTITY_SET}")
}

async fn list_dailies(
    State(db): State<Db>,
    Query(query): Query<ODataQuery>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let projection = Projection::parse(&query).map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    let table = db.read().await;
    debug!(rows = table.rows.len(), ?query, "listing dailies");
    let value: Vec<Value> = table.rows.iter().map(|d| projection.apply(d)).collect();
    Ok(Json(serde_json::json!({
        "@odata.context": context(),
        "value": value,
    })))
}

async fn create_daily(
    State(db): State<Db>,
    Json(input): Json<CreateDaily>,
) -> (StatusCode, Json<CovidDaily>) {
    let daily = db
        .write()
        .await
        .insert(input.person_confirmed, input.person_death, &input.country_name);
    debug!(id = daily.id, country = %daily.country_region.country_name, "created daily");
    (StatusCode::CREATED, Json(daily))
}

async fn update_daily(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateDaily>,
) -> Result<Json<CovidDaily>, StatusCode> {
    let mut table = db.write().await;
    let daily = table
        .rows
        .iter_mut()
        .find(|d| d.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    if let Some(confirmed) = input.person_confirmed {
        daily.person_confirmed = confirmed;
    }
    if let Some(deaths) = input.person_death {
        daily.person_death = deaths;
    }
    Ok(Json(daily.clone()))
}

async fn delete_daily(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut table = db.write().await;
    let pos = table
        .rows
        .iter()
        .position(|d| d.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    table.rows.remove(pos);
    Ok(StatusCode::NO_CONTENT)
}
