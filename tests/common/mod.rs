// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process mock of the customer/training REST+HAL API.

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use personal_trainer::config::Config;
use personal_trainer::AppState;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct MockData {
    pub base_url: String,
    pub customers: BTreeMap<u64, Value>,
    /// training id -> (fields, customer id)
    pub trainings: BTreeMap<u64, (Value, u64)>,
    /// "METHOD /path" for every request received
    pub requests: Vec<String>,
    /// Bodies of POST/PUT requests, in order
    pub bodies: Vec<Value>,
    pub fail_customers: bool,
    pub fail_trainings: bool,
    pub fail_mutations: bool,
    /// Customers whose link answers 404
    pub broken_customers: HashSet<u64>,
    next_id: u64,
}

#[derive(Clone)]
pub struct MockHal {
    pub data: Arc<Mutex<MockData>>,
}

#[allow(dead_code)]
impl MockHal {
    /// Start the mock on a random local port.
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock API");
        let addr = listener.local_addr().unwrap();

        let data = Arc::new(Mutex::new(MockData {
            base_url: format!("http://{}/api", addr),
            next_id: 100,
            ..Default::default()
        }));
        let mock = MockHal { data };

        let app = Router::new()
            .route("/api/customers", get(list_customers).post(create_customer))
            .route(
                "/api/customers/{id}",
                get(get_customer).put(update_customer).delete(delete_customer),
            )
            .route("/api/trainings", get(list_trainings).post(create_training))
            .route("/api/trainings/{id}", axum::routing::delete(delete_training))
            .route("/api/trainings/{id}/customer", get(training_customer))
            .layer(middleware::from_fn_with_state(mock.clone(), record_request))
            .with_state(mock.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        mock
    }

    pub fn base_url(&self) -> String {
        self.data.lock().unwrap().base_url.clone()
    }

    pub fn customer_href(&self, id: u64) -> String {
        format!("{}/customers/{}", self.base_url(), id)
    }

    pub fn training_href(&self, id: u64) -> String {
        format!("{}/trainings/{}", self.base_url(), id)
    }

    pub fn add_customer(&self, id: u64, firstname: &str, lastname: &str) {
        self.data.lock().unwrap().customers.insert(
            id,
            json!({
                "firstname": firstname,
                "lastname": lastname,
                "email": format!("{}@mail.com", firstname.to_lowercase()),
                "phone": "040-1234567",
                "streetaddress": "Main Street 1",
                "postcode": "00100",
                "city": "Helsinki"
            }),
        );
    }

    pub fn add_training(&self, id: u64, customer_id: u64, activity: &str, duration: u32) {
        self.data.lock().unwrap().trainings.insert(
            id,
            (
                json!({
                    "date": format!("2024-01-{:02}T09:00:00.000+00:00", (id % 28) + 1),
                    "duration": duration,
                    "activity": activity
                }),
                customer_id,
            ),
        );
    }

    pub fn requests(&self) -> Vec<String> {
        self.data.lock().unwrap().requests.clone()
    }

    pub fn count(&self, request: &str) -> usize {
        self.requests().iter().filter(|r| r.as_str() == request).count()
    }

    pub fn clear_requests(&self) {
        self.data.lock().unwrap().requests.clear();
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.data.lock().unwrap().bodies.clone()
    }

    pub fn set(&self, f: impl FnOnce(&mut MockData)) {
        f(&mut self.data.lock().unwrap());
    }

    /// Application state pointed at this mock.
    pub fn app_state(&self) -> Arc<AppState> {
        let config = Config {
            api_url: self.base_url(),
            ..Config::default()
        };
        Arc::new(AppState::new(config))
    }
}

async fn record_request(State(mock): State<MockHal>, request: Request, next: Next) -> Response {
    let line = format!("{} {}", request.method(), request.uri().path());
    mock.data.lock().unwrap().requests.push(line);
    next.run(request).await
}

fn customer_json(base: &str, id: u64, fields: &Value) -> Value {
    let mut customer = fields.clone();
    let href = format!("{}/customers/{}", base, id);
    customer["_links"] = json!({
        "self": { "href": href },
        "customer": { "href": href },
        "trainings": { "href": format!("{}/customers/{}/trainings", base, id) }
    });
    customer
}

async fn list_customers(State(mock): State<MockHal>) -> Response {
    let data = mock.data.lock().unwrap();
    if data.fail_customers {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let customers: Vec<Value> = data
        .customers
        .iter()
        .map(|(id, fields)| customer_json(&data.base_url, *id, fields))
        .collect();
    Json(json!({
        "_embedded": { "customers": customers },
        "_links": { "self": { "href": format!("{}/customers", data.base_url) } }
    }))
    .into_response()
}

async fn get_customer(State(mock): State<MockHal>, Path(id): Path<u64>) -> Response {
    let data = mock.data.lock().unwrap();
    match data.customers.get(&id) {
        Some(fields) if !data.broken_customers.contains(&id) => {
            Json(customer_json(&data.base_url, id, fields)).into_response()
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create_customer(State(mock): State<MockHal>, Json(body): Json<Value>) -> StatusCode {
    let mut data = mock.data.lock().unwrap();
    data.bodies.push(body.clone());
    if data.fail_mutations {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    let id = data.next_id;
    data.next_id += 1;
    data.customers.insert(id, body);
    StatusCode::CREATED
}

async fn update_customer(
    State(mock): State<MockHal>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> StatusCode {
    let mut data = mock.data.lock().unwrap();
    data.bodies.push(body.clone());
    if data.fail_mutations {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    match data.customers.get_mut(&id) {
        Some(existing) => {
            *existing = body;
            StatusCode::OK
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn delete_customer(State(mock): State<MockHal>, Path(id): Path<u64>) -> StatusCode {
    let mut data = mock.data.lock().unwrap();
    if data.fail_mutations {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    if data.customers.remove(&id).is_none() {
        return StatusCode::NOT_FOUND;
    }
    data.trainings.retain(|_, (_, owner)| *owner != id);
    StatusCode::NO_CONTENT
}

async fn list_trainings(State(mock): State<MockHal>) -> Response {
    let data = mock.data.lock().unwrap();
    if data.fail_trainings {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    let trainings: Vec<Value> = data
        .trainings
        .iter()
        .map(|(id, (fields, _))| {
            let mut training = fields.clone();
            let href = format!("{}/trainings/{}", data.base_url, id);
            training["_links"] = json!({
                "self": { "href": href },
                "training": { "href": href },
                "customer": { "href": format!("{}/customer", href) }
            });
            training
        })
        .collect();
    Json(json!({ "_embedded": { "trainings": trainings } })).into_response()
}

async fn training_customer(State(mock): State<MockHal>, Path(id): Path<u64>) -> Response {
    let data = mock.data.lock().unwrap();
    let Some((_, customer_id)) = data.trainings.get(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match data.customers.get(customer_id) {
        Some(fields) if !data.broken_customers.contains(customer_id) => {
            Json(customer_json(&data.base_url, *customer_id, fields)).into_response()
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create_training(State(mock): State<MockHal>, Json(body): Json<Value>) -> StatusCode {
    let mut data = mock.data.lock().unwrap();
    data.bodies.push(body.clone());
    if data.fail_mutations {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    let customer_id = body["customer"]
        .as_str()
        .and_then(|href| href.rsplit('/').next())
        .and_then(|id| id.parse::<u64>().ok());
    let Some(customer_id) = customer_id else {
        return StatusCode::BAD_REQUEST;
    };
    let id = data.next_id;
    data.next_id += 1;
    let fields = json!({
        "date": body["date"],
        "duration": body["duration"],
        "activity": body["activity"]
    });
    data.trainings.insert(id, (fields, customer_id));
    StatusCode::CREATED
}

async fn delete_training(State(mock): State<MockHal>, Path(id): Path<u64>) -> StatusCode {
    let mut data = mock.data.lock().unwrap();
    if data.trainings.remove(&id).is_some() {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
