use async_trait::async_trait;
use mongodb::bson::{doc, Bson, DateTime as BsonDateTime, Document};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::debug;

use crate::config::DatabaseConfig;

use super::domain::{EnrollmentLocation, RecordId, SubmissionRecord};
use super::repository::{RepositoryError, SubmissionRepository};

const APP_NAME: &str = "techalpha-api";

/// MongoDB-backed store writing one document per submission.
#[derive(Clone, Debug)]
pub struct MongoSubmissionRepository {
    database: Database,
}

impl MongoSubmissionRepository {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Build a pooled client from configuration. The driver connects lazily, so this only
    /// fails on a malformed URI.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, RepositoryError> {
        let mut options = ClientOptions::parse(config.uri.expose())
            .await
            .map_err(map_error)?;
        options.app_name = Some(APP_NAME.to_string());

        let client = Client::with_options(options).map_err(map_error)?;
        Ok(Self::new(client.database(&config.name)))
    }

    /// Round-trip to the server; used at startup to surface bad credentials early.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(map_error)
    }
}

#[async_trait]
impl SubmissionRepository for MongoSubmissionRepository {
    async fn insert(&self, record: SubmissionRecord) -> Result<RecordId, RepositoryError> {
        let collection = record.kind().collection();
        let document = to_document(&record);

        let result = self
            .database
            .collection::<Document>(collection)
            .insert_one(document)
            .await
            .map_err(map_error)?;

        let id = match result.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        };
        debug!(collection, %id, "submission stored");
        Ok(RecordId(id))
    }
}

fn map_error(err: MongoError) -> RepositoryError {
    match err.kind.as_ref() {
        ErrorKind::Write(_) => RepositoryError::Rejected(err.to_string()),
        _ => RepositoryError::Unavailable(err.to_string()),
    }
}

/// Map a record onto the stored document shape. The timestamp lives under `date`.
pub(crate) fn to_document(record: &SubmissionRecord) -> Document {
    let date = BsonDateTime::from_millis(record.submitted_at().timestamp_millis());

    match record {
        SubmissionRecord::Contact(contact) => doc! {
            "name": contact.name.as_str(),
            "email": contact.email.as_str(),
            "message": contact.message.as_str(),
            "date": date,
        },
        SubmissionRecord::Enrollment(enrollment) => {
            let mut document = doc! {
                "first_name": enrollment.first_name.as_str(),
                "last_name": enrollment.last_name.as_str(),
                "location": enrollment.location.display(),
                "class_type": enrollment.class_type.as_str(),
                "gender": enrollment.gender.as_str(),
                "pre_knowledge": enrollment.pre_knowledge.as_str(),
                "course": enrollment.course.as_str(),
                "date": date,
            };
            if let EnrollmentLocation::CityState { city, state } = &enrollment.location {
                document.insert("city", city.as_str());
                document.insert("state", state.as_str());
            }
            if let Some(email) = &enrollment.email {
                document.insert("email", email.as_str());
            }
            if let Some(phone) = &enrollment.phone {
                document.insert("phone", phone.as_str());
            }
            document
        }
        SubmissionRecord::Partnering(partnering) => doc! {
            "first_name": partnering.first_name.as_str(),
            "last_name": partnering.last_name.as_str(),
            "email": partnering.email.as_str(),
            "phone": partnering.phone.as_str(),
            "address": partnering.address.as_str(),
            "gender": partnering.gender.as_str(),
            "reason": partnering.reason.as_str(),
            "program": partnering.program.as_str(),
            "date": date,
        },
    }
}
