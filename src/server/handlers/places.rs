use axum::extract::{Extension, Json, Path, Query};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{PlaceCommandAPI, PlaceQueryAPI};
use crate::entities::{
    Coordinates, NewPlace, Place, PlaceChanges, PlaceFilter, PlaceLinkage, PlaceSummary,
};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct ListParams {
    lat: f64,
    lng: f64,
    r: Option<f64>,
    year_from: Option<i32>,
    year_to: Option<i32>,
    limit: Option<i64>,
}

#[derive(Serialize, Deserialize)]
pub struct ListResponse {
    pub success: bool,
    pub places: Vec<PlaceSummary>,
}

#[derive(Serialize, Deserialize)]
pub struct PlaceResponse {
    pub success: bool,
    pub place: Option<Place>,
}

#[derive(Serialize, Deserialize)]
pub struct LinkageResponse {
    pub success: bool,
    pub linkages: Vec<PlaceLinkage>,
}

pub async fn list(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, Error> {
    let center = Coordinates::new(params.lat, params.lng);
    let filter = PlaceFilter::new(
        center,
        params.r,
        params.year_from,
        params.year_to,
        params.limit,
    );

    let places = api.list_places(filter).await?;

    Ok(Json(ListResponse {
        success: true,
        places,
    }))
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<PlaceResponse>, Error> {
    let place = api.find_place(id).await?;

    Ok(Json(PlaceResponse {
        success: true,
        place,
    }))
}

pub async fn find_linkage(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<LinkageResponse>, Error> {
    let linkages = api.find_linkages(id).await?;

    Ok(Json(LinkageResponse {
        success: true,
        linkages,
    }))
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<NewPlace>,
) -> Result<Json<PlaceResponse>, Error> {
    let place = api.create_place(params).await?;

    Ok(Json(PlaceResponse {
        success: true,
        place: Some(place),
    }))
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<PlaceChanges>,
) -> Result<Json<PlaceResponse>, Error> {
    let place = api.update_place(id, params).await?;

    Ok(Json(PlaceResponse {
        success: true,
        place: Some(place),
    }))
}
