//! Test doubles and common utilities for contract tests
//!
//! `FakePoweradmin` is an in-memory model of the remote API behind the
//! `Transport` seam. It keeps zones, records (RRSets are derived by
//! grouping records on name and type), users and permissions, applies bulk
//! batches atomically, and records every request it receives.

#![allow(dead_code)]

use async_trait::async_trait;
use poweradmin_core::{ApiClient, ApiRequest, Error, Method, RawResponse, ResourceRegistry, Result, Transport};
use serde_json::{Value, json};
use std::collections::{BTreeMap, VecDeque};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct FakeZone {
    pub id: i64,
    pub name: String,
    pub zone_type: String,
    pub masters: String,
    pub account: String,
    pub description: String,
    pub serial: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FakeRecord {
    pub id: i64,
    pub zone_id: i64,
    pub name: String,
    pub rtype: String,
    pub content: String,
    pub ttl: u32,
    pub priority: u32,
    pub disabled: bool,
}

#[derive(Debug, Clone)]
pub struct FakeUser {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub fullname: String,
    pub email: String,
    pub description: String,
    pub active: bool,
    pub perm_templ: i64,
    pub use_ldap: bool,
}

/// What an injected fault does to the matching request
#[derive(Debug, Clone)]
pub enum Fault {
    /// Answer with this status and message; the request is not applied
    Status(u16, String),
    /// Fail the exchange itself
    Transport(String),
}

#[derive(Debug)]
struct PendingFault {
    method: Method,
    path_fragment: String,
    fault: Fault,
}

#[derive(Debug, Default)]
struct FakeState {
    next_id: i64,
    zones: BTreeMap<i64, FakeZone>,
    records: BTreeMap<i64, FakeRecord>,
    users: BTreeMap<i64, FakeUser>,
    permissions: Vec<Value>,
    faults: VecDeque<PendingFault>,
    log: Vec<ApiRequest>,
    delete_bodies: Vec<Option<Value>>,
    put_bodies: Vec<Value>,
}

impl FakeState {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory Poweradmin API
#[derive(Clone, Default)]
pub struct FakePoweradmin {
    state: Arc<Mutex<FakeState>>,
    calls: Arc<AtomicUsize>,
}

impl FakePoweradmin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared transport handle for an `ApiClient`
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::new(self.clone())
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.transport())
    }

    pub fn registry(&self) -> ResourceRegistry {
        ResourceRegistry::new(self.client())
    }

    /// Number of `send()` calls so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().log.clone()
    }

    /// Bodies of the `PUT` requests received so far
    pub fn put_bodies(&self) -> Vec<Value> {
        self.state.lock().unwrap().put_bodies.clone()
    }

    /// Bodies of the `DELETE` requests received so far
    pub fn delete_bodies(&self) -> Vec<Option<Value>> {
        self.state.lock().unwrap().delete_bodies.clone()
    }

    /// Fail the next request whose method matches and whose path contains
    /// `path_fragment`
    pub fn fail_next(&self, method: Method, path_fragment: &str, fault: Fault) {
        self.state.lock().unwrap().faults.push_back(PendingFault {
            method,
            path_fragment: path_fragment.to_string(),
            fault,
        });
    }

    pub fn add_zone(&self, name: &str, zone_type: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.allocate_id();
        state.zones.insert(
            id,
            FakeZone {
                id,
                name: name.to_string(),
                zone_type: zone_type.to_string(),
                masters: String::new(),
                account: String::new(),
                description: String::new(),
                serial: 2024010101,
            },
        );
        id
    }

    pub fn add_record(&self, zone_id: i64, name: &str, rtype: &str, content: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.allocate_id();
        state.records.insert(
            id,
            FakeRecord {
                id,
                zone_id,
                name: name.to_string(),
                rtype: rtype.to_string(),
                content: content.to_string(),
                ttl: 3600,
                priority: 0,
                disabled: false,
            },
        );
        id
    }

    pub fn add_user(&self, username: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.allocate_id();
        state.users.insert(
            id,
            FakeUser {
                id,
                username: username.to_string(),
                password: "initial".to_string(),
                fullname: username.to_string(),
                email: format!("{}@example.com", username),
                description: String::new(),
                active: true,
                perm_templ: 1,
                use_ldap: false,
            },
        );
        id
    }

    pub fn add_permission(&self, id: i64, name: &str, descr: &str) {
        self.state
            .lock()
            .unwrap()
            .permissions
            .push(json!({"id": id, "name": name, "descr": descr}));
    }

    pub fn zone(&self, id: i64) -> Option<FakeZone> {
        self.state.lock().unwrap().zones.get(&id).cloned()
    }

    pub fn user(&self, id: i64) -> Option<FakeUser> {
        self.state.lock().unwrap().users.get(&id).cloned()
    }

    pub fn record(&self, id: i64) -> Option<FakeRecord> {
        self.state.lock().unwrap().records.get(&id).cloned()
    }

    /// Records of a zone, ordered by id
    pub fn records_in(&self, zone_id: i64) -> Vec<FakeRecord> {
        self.state
            .lock()
            .unwrap()
            .records
            .values()
            .filter(|r| r.zone_id == zone_id)
            .cloned()
            .collect()
    }

    /// Contents of the set `(name, type)`, sorted
    pub fn rrset_contents(&self, zone_id: i64, name: &str, rtype: &str) -> Vec<String> {
        let mut contents: Vec<String> = self
            .records_in(zone_id)
            .into_iter()
            .filter(|r| r.name == name && r.rtype == rtype)
            .map(|r| r.content)
            .collect();
        contents.sort();
        contents
    }
}

#[async_trait]
impl Transport for FakePoweradmin {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        state.log.push(request.clone());

        let position = state
            .faults
            .iter()
            .position(|f| f.method == request.method && request.path.contains(&f.path_fragment));
        if let Some(position) = position {
            if let Some(pending) = state.faults.remove(position) {
                return match pending.fault {
                    Fault::Status(status, message) => Ok(failure(status, &message)),
                    Fault::Transport(message) => Err(Error::transport(message)),
                };
            }
        }

        Ok(route(&mut state, &request))
    }

    fn transport_name(&self) -> &'static str {
        "fake"
    }
}

/// A transport that never answers
#[derive(Clone, Default)]
pub struct StallingTransport {
    calls: Arc<AtomicUsize>,
}

impl StallingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for StallingTransport {
    async fn send(&self, _request: ApiRequest) -> Result<RawResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }

    fn transport_name(&self) -> &'static str {
        "stalling"
    }
}

/// Transport answering every request with the same status and body
#[derive(Debug, Clone)]
pub struct CannedTransport {
    status: u16,
    body: String,
    calls: Arc<AtomicUsize>,
}

impl CannedTransport {
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(Arc::new(self.clone()))
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for CannedTransport {
    async fn send(&self, _request: ApiRequest) -> Result<RawResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RawResponse::new(self.status, self.body.clone()))
    }

    fn transport_name(&self) -> &'static str {
        "canned"
    }
}

fn success(status: u16, data: Option<Value>) -> RawResponse {
    let mut body = json!({
        "success": true,
        "message": "OK",
        "meta": {"timestamp": "2025-01-01T00:00:00Z"}
    });
    if let Some(data) = data {
        body["data"] = data;
    }
    RawResponse::new(status, body.to_string())
}

fn failure(status: u16, message: &str) -> RawResponse {
    RawResponse::new(
        status,
        json!({
            "success": false,
            "message": "Request failed",
            "error": {"code": status, "message": message}
        })
        .to_string(),
    )
}

fn not_found(what: &str) -> RawResponse {
    failure(404, &format!("{} not found", what))
}

fn zone_json(zone: &FakeZone) -> Value {
    json!({
        "id": zone.id,
        "name": zone.name,
        "type": zone.zone_type,
        "masters": zone.masters,
        "account": zone.account,
        "description": zone.description,
        "soa_serial": zone.serial,
        "dnssec_signed": 0
    })
}

fn record_json(record: &FakeRecord) -> Value {
    json!({
        "id": record.id,
        "zone_id": record.zone_id,
        "name": record.name,
        "type": record.rtype,
        "content": record.content,
        "ttl": record.ttl,
        "priority": record.priority,
        "disabled": if record.disabled { 1 } else { 0 }
    })
}

fn user_json(user: &FakeUser) -> Value {
    json!({
        "user_id": user.id,
        "username": user.username,
        "fullname": user.fullname,
        "email": user.email,
        "description": user.description,
        "active": user.active,
        "perm_templ": user.perm_templ,
        "use_ldap": user.use_ldap
    })
}

fn rrset_json(name: &str, rtype: &str, members: &[&FakeRecord]) -> Value {
    json!({
        "name": name,
        "type": rtype,
        "ttl": members.first().map(|r| r.ttl).unwrap_or(3600),
        "records": members
            .iter()
            .map(|r| json!({"content": r.content, "disabled": r.disabled, "priority": r.priority}))
            .collect::<Vec<_>>()
    })
}

fn str_field(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).map(str::to_string)
}

fn u32_field(body: &Value, key: &str) -> Option<u32> {
    body.get(key).and_then(Value::as_u64).map(|v| v as u32)
}

fn bool_field(body: &Value, key: &str) -> Option<bool> {
    body.get(key).and_then(Value::as_bool)
}

/// Content the fake rejects, standing in for server-side validation
fn invalid_content(rtype: &str, content: &str) -> bool {
    content.is_empty() || (rtype == "A" && content.parse::<Ipv4Addr>().is_err())
}

fn route(state: &mut FakeState, request: &ApiRequest) -> RawResponse {
    let path = request.path.strip_prefix("/api/v2/").unwrap_or(&request.path);
    let (path, query) = match path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (path, None),
    };
    let type_filter = query
        .and_then(|q| q.split('&').find_map(|kv| kv.strip_prefix("type=")))
        .map(str::to_string);
    let segments: Vec<&str> = path.split('/').collect();
    let body = request.body.clone().unwrap_or(Value::Null);

    let parse = |s: &str| s.parse::<i64>().ok();

    match (request.method, segments.as_slice()) {
        (Method::Get, ["zones"]) => {
            let zones: Vec<Value> = state.zones.values().map(zone_json).collect();
            let total = zones.len();
            success(
                200,
                Some(json!({
                    "zones": zones,
                    "pagination": {"current_page": 1, "per_page": 100, "total_pages": 1, "total_items": total}
                })),
            )
        }
        (Method::Post, ["zones"]) => {
            let Some(name) = str_field(&body, "name") else {
                return failure(400, "name is required");
            };
            if state.zones.values().any(|z| z.name == name) {
                return failure(409, &format!("zone {} already exists", name));
            }
            let id = state.allocate_id();
            state.zones.insert(
                id,
                FakeZone {
                    id,
                    name,
                    zone_type: str_field(&body, "type").unwrap_or_else(|| "MASTER".into()),
                    masters: str_field(&body, "masters").unwrap_or_default(),
                    account: str_field(&body, "account").unwrap_or_default(),
                    description: str_field(&body, "description").unwrap_or_default(),
                    serial: 2024010101,
                },
            );
            success(201, Some(json!({"zone_id": id})))
        }
        (method, ["zones", id]) => {
            let Some(id) = parse(id) else {
                return failure(400, "invalid zone id");
            };
            if !state.zones.contains_key(&id) {
                return not_found("Zone");
            }
            match method {
                Method::Get => success(200, Some(json!({"zone": zone_json(&state.zones[&id])}))),
                Method::Put => {
                    state.put_bodies.push(body.clone());
                    if let Some(zone) = state.zones.get_mut(&id) {
                        if let Some(v) = str_field(&body, "type") {
                            zone.zone_type = v;
                        }
                        if let Some(v) = str_field(&body, "masters") {
                            zone.masters = v;
                        }
                        if let Some(v) = str_field(&body, "account") {
                            zone.account = v;
                        }
                        if let Some(v) = str_field(&body, "description") {
                            zone.description = v;
                        }
                        zone.serial += 1;
                    }
                    // Zone updates are not echoed
                    success(200, None)
                }
                Method::Delete => {
                    state.zones.remove(&id);
                    state.records.retain(|_, r| r.zone_id != id);
                    success(204, None)
                }
                Method::Post => failure(405, "method not allowed"),
            }
        }
        (method, ["zones", zone_id, "records", rest @ ..]) => {
            let Some(zone_id) = parse(zone_id) else {
                return failure(400, "invalid zone id");
            };
            if !state.zones.contains_key(&zone_id) {
                return not_found("Zone");
            }
            route_records(state, method, zone_id, rest, type_filter, body)
        }
        (method, ["zones", zone_id, "rrsets", rest @ ..]) => {
            let Some(zone_id) = parse(zone_id) else {
                return failure(400, "invalid zone id");
            };
            if !state.zones.contains_key(&zone_id) {
                return not_found("Zone");
            }
            route_rrsets(state, method, zone_id, rest, type_filter, body)
        }
        (Method::Get, ["users"]) => {
            let users: Vec<Value> = state.users.values().map(user_json).collect();
            success(200, Some(Value::Array(users)))
        }
        (Method::Post, ["users"]) => {
            let Some(username) = str_field(&body, "username") else {
                return failure(400, "username is required");
            };
            if state.users.values().any(|u| u.username == username) {
                return failure(409, &format!("user {} already exists", username));
            }
            let id = state.allocate_id();
            state.users.insert(
                id,
                FakeUser {
                    id,
                    username,
                    password: str_field(&body, "password").unwrap_or_default(),
                    fullname: str_field(&body, "fullname").unwrap_or_default(),
                    email: str_field(&body, "email").unwrap_or_default(),
                    description: str_field(&body, "description").unwrap_or_default(),
                    active: bool_field(&body, "active").unwrap_or(true),
                    perm_templ: body.get("perm_templ").and_then(Value::as_i64).unwrap_or(0),
                    use_ldap: bool_field(&body, "use_ldap").unwrap_or(false),
                },
            );
            success(201, Some(json!({"user_id": id})))
        }
        (method, ["users", id]) => {
            let Some(id) = parse(id) else {
                return failure(400, "invalid user id");
            };
            if !state.users.contains_key(&id) {
                return not_found("User");
            }
            match method {
                Method::Get => success(200, Some(json!({"user": user_json(&state.users[&id])}))),
                Method::Put => {
                    state.put_bodies.push(body.clone());
                    if let Some(user) = state.users.get_mut(&id) {
                        if let Some(v) = str_field(&body, "username") {
                            user.username = v;
                        }
                        if let Some(v) = str_field(&body, "password") {
                            user.password = v;
                        }
                        if let Some(v) = str_field(&body, "fullname") {
                            user.fullname = v;
                        }
                        if let Some(v) = str_field(&body, "email") {
                            user.email = v;
                        }
                        if let Some(v) = str_field(&body, "description") {
                            user.description = v;
                        }
                        if let Some(v) = bool_field(&body, "active") {
                            user.active = v;
                        }
                        if let Some(v) = body.get("perm_templ").and_then(Value::as_i64) {
                            user.perm_templ = v;
                        }
                        if let Some(v) = bool_field(&body, "use_ldap") {
                            user.use_ldap = v;
                        }
                    }
                    success(200, None)
                }
                Method::Delete => {
                    state.delete_bodies.push(request.body.clone());
                    state.users.remove(&id);
                    success(200, None)
                }
                Method::Post => failure(405, "method not allowed"),
            }
        }
        (Method::Get, ["permissions"]) => success(200, Some(Value::Array(state.permissions.clone()))),
        (Method::Get, ["permissions", id]) => {
            let id = parse(id);
            match state
                .permissions
                .iter()
                .find(|p| p.get("id").and_then(Value::as_i64) == id)
            {
                Some(p) => success(200, Some(json!({"permission": p}))),
                None => not_found("Permission"),
            }
        }
        _ => not_found("Endpoint"),
    }
}

fn route_records(
    state: &mut FakeState,
    method: Method,
    zone_id: i64,
    rest: &[&str],
    type_filter: Option<String>,
    body: Value,
) -> RawResponse {
    match (method, rest) {
        (Method::Get, []) => {
            let records: Vec<Value> = state
                .records
                .values()
                .filter(|r| r.zone_id == zone_id)
                .filter(|r| type_filter.as_deref().is_none_or(|t| r.rtype == t))
                .map(record_json)
                .collect();
            success(200, Some(json!({"records": records})))
        }
        (Method::Post, []) => match new_record(state, zone_id, &body) {
            Ok(record) => {
                let echoed = record_json(&record);
                state.records.insert(record.id, record);
                success(201, Some(json!({"record": echoed})))
            }
            Err(message) => failure(400, &message),
        },
        (Method::Post, ["bulk"]) => bulk(state, zone_id, &body),
        (method, [id]) => {
            let Some(id) = id.parse::<i64>().ok() else {
                return failure(400, "invalid record id");
            };
            if !state.records.get(&id).is_some_and(|r| r.zone_id == zone_id) {
                return not_found("Record");
            }
            match method {
                Method::Get => success(200, Some(json!({"record": record_json(&state.records[&id])}))),
                Method::Put => {
                    state.put_bodies.push(body.clone());
                    let Some(record) = state.records.get_mut(&id) else {
                        return not_found("Record");
                    };
                    apply_record_update(record, &body);
                    success(200, Some(json!({"record": record_json(record)})))
                }
                Method::Delete => {
                    state.records.remove(&id);
                    success(204, None)
                }
                Method::Post => failure(405, "method not allowed"),
            }
        }
        _ => not_found("Endpoint"),
    }
}

fn new_record(state: &mut FakeState, zone_id: i64, body: &Value) -> std::result::Result<FakeRecord, String> {
    let name = str_field(body, "name").unwrap_or_default();
    let rtype = str_field(body, "type").unwrap_or_default();
    let content = str_field(body, "content").unwrap_or_default();
    if name.is_empty() || rtype.is_empty() {
        return Err("name and type are required".into());
    }
    if invalid_content(&rtype, &content) {
        return Err(format!("invalid content '{}' for {} record", content, rtype));
    }
    Ok(FakeRecord {
        id: state.allocate_id(),
        zone_id,
        name,
        rtype,
        content,
        ttl: u32_field(body, "ttl").unwrap_or(3600),
        priority: u32_field(body, "priority").unwrap_or(0),
        disabled: bool_field(body, "disabled").unwrap_or(false),
    })
}

fn apply_record_update(record: &mut FakeRecord, body: &Value) {
    if let Some(v) = str_field(body, "name") {
        record.name = v;
    }
    if let Some(v) = str_field(body, "type") {
        record.rtype = v;
    }
    if let Some(v) = str_field(body, "content") {
        record.content = v;
    }
    if let Some(v) = u32_field(body, "ttl") {
        record.ttl = v;
    }
    if let Some(v) = u32_field(body, "priority") {
        record.priority = v;
    }
    if let Some(v) = bool_field(body, "disabled") {
        record.disabled = v;
    }
}

/// Validate the whole batch against a scratch copy, then commit or reject
fn bulk(state: &mut FakeState, zone_id: i64, body: &Value) -> RawResponse {
    let operations = body
        .get("operations")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut scratch = state.records.clone();
    let mut next_id = state.next_id;
    let mut errors = Vec::new();

    for (index, op) in operations.iter().enumerate() {
        let action = op.get("action").and_then(Value::as_str).unwrap_or_default();
        let target = op.get("id").and_then(Value::as_i64);
        match action {
            "create" => {
                let rtype = str_field(op, "type").unwrap_or_default();
                let content = str_field(op, "content").unwrap_or_default();
                if invalid_content(&rtype, &content) {
                    errors.push(format!("operation {}: invalid content '{}'", index + 1, content));
                    break;
                }
                next_id += 1;
                scratch.insert(
                    next_id,
                    FakeRecord {
                        id: next_id,
                        zone_id,
                        name: str_field(op, "name").unwrap_or_default(),
                        rtype,
                        content,
                        ttl: u32_field(op, "ttl").unwrap_or(3600),
                        priority: u32_field(op, "priority").unwrap_or(0),
                        disabled: bool_field(op, "disabled").unwrap_or(false),
                    },
                );
            }
            "update" => match target.and_then(|id| scratch.get_mut(&id)) {
                Some(record) if record.zone_id == zone_id => apply_record_update(record, op),
                _ => {
                    errors.push(format!("operation {}: record not found", index + 1));
                    break;
                }
            },
            "delete" => {
                if target.and_then(|id| scratch.remove(&id)).is_none() {
                    errors.push(format!("operation {}: record not found", index + 1));
                    break;
                }
            }
            other => {
                errors.push(format!("operation {}: unknown action '{}'", index + 1, other));
                break;
            }
        }
    }

    if !errors.is_empty() {
        let body = json!({
            "success": false,
            "message": "Bulk operation failed",
            "data": {"success_count": 0, "failure_count": errors.len(), "errors": errors}
        });
        return RawResponse::new(400, body.to_string());
    }

    state.records = scratch;
    state.next_id = next_id;
    success(
        200,
        Some(json!({"success_count": operations.len(), "failure_count": 0, "errors": []})),
    )
}

fn route_rrsets(
    state: &mut FakeState,
    method: Method,
    zone_id: i64,
    rest: &[&str],
    type_filter: Option<String>,
    body: Value,
) -> RawResponse {
    match (method, rest) {
        (Method::Get, []) => {
            let mut groups: BTreeMap<(String, String), Vec<&FakeRecord>> = BTreeMap::new();
            for record in state.records.values().filter(|r| r.zone_id == zone_id) {
                if type_filter.as_deref().is_none_or(|t| record.rtype == t) {
                    groups
                        .entry((record.name.clone(), record.rtype.clone()))
                        .or_default()
                        .push(record);
                }
            }
            let rrsets: Vec<Value> = groups
                .iter()
                .map(|((name, rtype), members)| rrset_json(name, rtype, members))
                .collect();
            success(200, Some(Value::Array(rrsets)))
        }
        (Method::Put, []) => {
            state.put_bodies.push(body.clone());
            let name = str_field(&body, "name").unwrap_or_default();
            let rtype = str_field(&body, "type").unwrap_or_default();
            let ttl = u32_field(&body, "ttl").unwrap_or(3600);
            let members = body
                .get("records")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            for member in &members {
                let content = str_field(member, "content").unwrap_or_default();
                if invalid_content(&rtype, &content) {
                    return failure(400, &format!("invalid content '{}'", content));
                }
            }
            state
                .records
                .retain(|_, r| !(r.zone_id == zone_id && r.name == name && r.rtype == rtype));
            // Stored in reverse to show that member order is not preserved
            for member in members.iter().rev() {
                let id = state.allocate_id();
                state.records.insert(
                    id,
                    FakeRecord {
                        id,
                        zone_id,
                        name: name.clone(),
                        rtype: rtype.clone(),
                        content: str_field(member, "content").unwrap_or_default(),
                        ttl,
                        priority: u32_field(member, "priority").unwrap_or(0),
                        disabled: bool_field(member, "disabled").unwrap_or(false),
                    },
                );
            }
            success(200, None)
        }
        (method, [name, rtype]) => {
            let members: Vec<&FakeRecord> = state
                .records
                .values()
                .filter(|r| r.zone_id == zone_id && r.name == *name && r.rtype == *rtype)
                .collect();
            if members.is_empty() {
                return not_found("RRSet");
            }
            match method {
                Method::Get => success(200, Some(json!({"rrset": rrset_json(name, rtype, &members)}))),
                Method::Delete => {
                    let (name, rtype) = (name.to_string(), rtype.to_string());
                    state
                        .records
                        .retain(|_, r| !(r.zone_id == zone_id && r.name == name && r.rtype == rtype));
                    success(204, None)
                }
                _ => failure(405, "method not allowed"),
            }
        }
        _ => not_found("Endpoint"),
    }
}
