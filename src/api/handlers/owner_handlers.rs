use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError};
use actix_web::http::Method;
use serde_json::{Map, Value};

use crate::api::state::AppState;
use crate::domain::owner::model::{
    DeleteOwnerReceive, DeleteOwnerSend, OwnerQuery, OwnersSend, SaveOwnerReceive, SaveOwnerSend,
    UpdateOwnerReceive, UpdateOwnerSend,
};
use crate::utils::errors::ApiError;

pub async fn status() -> impl Responder {
    HttpResponse::Ok().json("Service is operational")
}

pub async fn get_owner(
    state: web::Data<AppState>,
    query: web::Query<OwnerQuery>
) -> impl Responder {
    let owner_id = match query.into_inner().ownerid.filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => return ApiError::BadRequest("Missing ownerid parameter".to_string()).error_response()
    };

    match state.owners.get_owner(&owner_id).await {
        Ok(owner) => HttpResponse::Ok().json(owner),
        Err(e) => e.error_response()
    }
}

pub async fn get_all_owners(
    state: web::Data<AppState>
) -> impl Responder {
    match state.owners.get_all_owners().await {
        Ok(owners) => HttpResponse::Ok().json(OwnersSend { owners }),
        Err(e) => e.error_response()
    }
}

pub async fn save_owner(
    state: web::Data<AppState>,
    body: web::Bytes
) -> impl Responder {
    let request = match parse_body(&body).and_then(|body| SaveOwnerReceive::from_body(&body)) {
        Ok(request) => request,
        Err(e) => return e.error_response()
    };

    let upload_url = match state.storage.presign_put(&request.file_name, &request.file_type) {
        Ok(url) => url,
        Err(e) => return e.error_response()
    };
    let file_url = match state.storage.presign_get(&request.file_name) {
        Ok(url) => url,
        Err(e) => return e.error_response()
    };

    let item = request.to_record();
    match state.owners.save_owner(item.clone()).await {
        Ok(_) => {
            log::info!("Saved owner {} and issued upload URL for {}", item.ownerid, request.file_name);
            HttpResponse::Ok().json(SaveOwnerSend {
                operation: "SAVE",
                message: "SUCCESS",
                item,
                upload_url,
                file_url
            })
        },
        Err(e) => e.error_response()
    }
}

pub async fn update_owner(
    state: web::Data<AppState>,
    body: web::Bytes
) -> impl Responder {
    let request = match parse_body(&body).and_then(|body| UpdateOwnerReceive::from_body(&body)) {
        Ok(request) => request,
        Err(e) => return e.error_response()
    };

    match state.owners
        .update_owner_attribute(&request.owner_id, &request.update_key, request.update_value.clone())
        .await
    {
        Ok(_) => {
            let mut updated_attributes = Map::new();
            updated_attributes.insert(request.update_key, request.update_value);
            HttpResponse::Ok().json(UpdateOwnerSend {
                operation: "UPDATE",
                message: "SUCCESS",
                updated_attributes
            })
        },
        Err(e) => e.error_response()
    }
}

pub async fn delete_owner(
    state: web::Data<AppState>,
    body: web::Bytes
) -> impl Responder {
    let request = match parse_body(&body).and_then(|body| DeleteOwnerReceive::from_body(&body)) {
        Ok(request) => request,
        Err(e) => return e.error_response()
    };

    match state.owners.delete_owner(&request.owner_id).await {
        Ok(item) => HttpResponse::Ok().json(DeleteOwnerSend {
            operation: "DELETE",
            message: "SUCCESS",
            item
        }),
        Err(e) => e.error_response()
    }
}

/// Answers CORS preflights anywhere and 404s everything else.
pub async fn fallback(req: HttpRequest) -> impl Responder {
    if req.method() == Method::OPTIONS {
        return HttpResponse::Ok().json("");
    }
    log::debug!("No route for {} {}", req.method(), req.path());
    ApiError::NotFound("404 Not Found".to_string()).error_response()
}

fn parse_body(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(ApiError::BadRequest("Missing request body".to_string()));
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => {
            log::debug!("Received request body: {:?}", map);
            Ok(map)
        },
        Ok(_) | Err(_) => Err(ApiError::BadRequest("Invalid JSON in request body".to_string())),
    }
}
