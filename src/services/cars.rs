// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Car endpoints.

use crate::error::Result;
use crate::models::{Car, CarPatch, NewCar};
use crate::services::ApiClient;

#[derive(Clone)]
pub struct CarsApi {
    client: ApiClient,
}

impl CarsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Car>> {
        let cars: Option<Vec<Car>> = self.client.get("/cars/").await?;
        Ok(cars.unwrap_or_default())
    }

    /// Cars owned by the signed-in user.
    pub async fn mine(&self) -> Result<Vec<Car>> {
        let cars: Option<Vec<Car>> = self.client.get("/cars/my").await?;
        Ok(cars.unwrap_or_default())
    }

    pub async fn create(&self, car: &NewCar) -> Result<Car> {
        self.client.post("/cars/", car).await
    }

    pub async fn update(&self, car_id: i64, patch: &CarPatch) -> Result<Car> {
        self.client.put(&format!("/cars/{}", car_id), patch).await
    }

    /// Rides still referencing the car are not checked here.
    pub async fn delete(&self, car_id: i64) -> Result<()> {
        let _: serde_json::Value = self.client.delete(&format!("/cars/{}", car_id)).await?;
        Ok(())
    }
}
