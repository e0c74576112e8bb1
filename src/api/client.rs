//! REST client for the hospital resource API
//!
//! One method per API operation. Detail and nested collection URLs
//! are supplied by the server through link fields in prior responses
//! and resolved against the configured base endpoint; only the
//! `nurses` collection root is built locally.

use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::config::{ResponseFormat, Settings};
use crate::error::ClientError;
use crate::models::{
    MedicamentEnvelope, MedicamentPayload, MedicationListEnvelope, NurseEnvelope,
    NurseListEnvelope, NursePayload, NurseSummary, PatientEnvelope, PatientListEnvelope,
    PatientPayload,
};

/// Client for the hospital REST API. Carries the configured base
/// endpoint, the fixed `Authorization` value and the negotiated
/// response format.
pub struct HospitalClient {
    http: Client,
    base_url: Url,
    authorization: String,
    format: ResponseFormat,
}

impl HospitalClient {
    pub fn new(settings: &Settings) -> Result<Self, ClientError> {
        // A trailing slash keeps relative joins below the api root.
        let base_url = Url::parse(&format!("{}/", settings.base_url.trim_end_matches('/')))?;
        Ok(Self {
            http: Client::new(),
            base_url,
            authorization: settings.authorization.clone(),
            format: settings.response_format,
        })
    }

    /// GET the `nurses` collection.
    pub async fn nurses_list(&self) -> Result<Vec<NurseSummary>, ClientError> {
        let envelope: NurseListEnvelope = self.fetch(self.nurses_url()?).await?;
        Ok(envelope.nurses_list)
    }

    /// GET a nurse detail resource by its href.
    pub async fn nurse(&self, href: &str) -> Result<NurseEnvelope, ClientError> {
        self.fetch(self.resolve(href)?).await
    }

    /// GET a nurse's patient list by the href from the nurse detail.
    pub async fn nurse_patients(&self, href: &str) -> Result<PatientListEnvelope, ClientError> {
        self.fetch(self.resolve(href)?).await
    }

    /// GET a patient detail resource by its href.
    pub async fn patient(&self, href: &str) -> Result<PatientEnvelope, ClientError> {
        self.fetch(self.resolve(href)?).await
    }

    /// GET a patient's medication list by the href from the patient
    /// detail.
    pub async fn patient_medication(
        &self,
        href: &str,
    ) -> Result<MedicationListEnvelope, ClientError> {
        self.fetch(self.resolve(href)?).await
    }

    /// GET a medicament detail resource by its href.
    pub async fn medicament(&self, href: &str) -> Result<MedicamentEnvelope, ClientError> {
        self.fetch(self.resolve(href)?).await
    }

    /// POST a new nurse to the collection root. Returns the created
    /// resource's href from the Location header.
    pub async fn create_nurse(&self, payload: &NursePayload) -> Result<String, ClientError> {
        self.create(self.nurses_url()?, payload).await
    }

    /// PUT changed nurse fields to the nurse's href.
    pub async fn update_nurse(
        &self,
        href: &str,
        payload: &NursePayload,
    ) -> Result<(), ClientError> {
        self.update(href, payload).await
    }

    /// DELETE a nurse by its href.
    pub async fn delete_nurse(&self, href: &str) -> Result<(), ClientError> {
        self.remove(href).await
    }

    /// PUT changed patient fields to the patient's href.
    pub async fn update_patient(
        &self,
        href: &str,
        payload: &PatientPayload,
    ) -> Result<(), ClientError> {
        self.update(href, payload).await
    }

    /// DELETE a patient by its href.
    pub async fn delete_patient(&self, href: &str) -> Result<(), ClientError> {
        self.remove(href).await
    }

    /// POST a new medicament to a patient's medication-list href.
    /// Returns the created resource's href from the Location header.
    pub async fn create_medicament(
        &self,
        medication_href: &str,
        payload: &MedicamentPayload,
    ) -> Result<String, ClientError> {
        self.create(self.resolve(medication_href)?, payload).await
    }

    /// PUT changed medicament fields to the medicament's href.
    pub async fn update_medicament(
        &self,
        href: &str,
        payload: &MedicamentPayload,
    ) -> Result<(), ClientError> {
        self.update(href, payload).await
    }

    /// DELETE a medicament by its href.
    pub async fn delete_medicament(&self, href: &str) -> Result<(), ClientError> {
        self.remove(href).await
    }

    fn nurses_url(&self) -> Result<Url, ClientError> {
        Ok(self.base_url.join("nurses/")?)
    }

    /// Resolve a server-supplied href against the base endpoint.
    /// Hrefs are server-relative paths, so this keeps the configured
    /// scheme and host.
    fn resolve(&self, href: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(href)?)
    }

    fn request(&self, method: Method, url: Url) -> Result<RequestBuilder, ClientError> {
        if self.format != ResponseFormat::Json {
            return Err(ClientError::UnsupportedFormat(self.format));
        }
        Ok(self
            .http
            .request(method, url)
            .header(header::AUTHORIZATION, self.authorization.as_str())
            .header(header::ACCEPT, self.format.content_type()))
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        debug!(%url, "GET");
        let response = self.request(Method::GET, url)?.send().await?;
        let response = Self::expect_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn create<P: Serialize>(&self, url: Url, payload: &P) -> Result<String, ClientError> {
        debug!(%url, "POST");
        let response = self
            .request(Method::POST, url)?
            .header(header::CONTENT_TYPE, self.format.content_type())
            .json(payload)
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or(ClientError::MissingLocation)
    }

    async fn update<P: Serialize>(&self, href: &str, payload: &P) -> Result<(), ClientError> {
        let url = self.resolve(href)?;
        debug!(%url, "PUT");
        let response = self
            .request(Method::PUT, url)?
            .header(header::CONTENT_TYPE, self.format.content_type())
            .json(payload)
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    async fn remove(&self, href: &str) -> Result<(), ClientError> {
        let url = self.resolve(href)?;
        debug!(%url, "DELETE");
        let response = self.request(Method::DELETE, url)?.send().await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    async fn expect_success(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(ClientError::UnexpectedStatus {
                status,
                url: response.url().to_string(),
            })
        }
    }
}
