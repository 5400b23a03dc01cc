//! The dashboard service.
//!
//! Every operation runs the same gauntlet, in order: authorization, then
//! validation, then delegation to the dual-store facade. The stores
//! themselves never see a session; access control lives here and only
//! here.

use tracing::info;

use himaya_auth::{login, seed_users, Session, User};
use himaya_domain::{
    is_known_wilaya, validate_date, wilaya_name, GlobalStats, ValidationError, WilayaRecord,
    WILAYAS,
};
use himaya_io::{export_file_name, import_into, write_workbook};
use himaya_store::{DualStore, Replica};

use crate::error::HimayaError;

/// Which replica(s) a database-image import writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportTarget {
    KeyValue,
    Relational,
    Both,
}

/// Authorization-checked front door over the dual store.
pub struct DashboardService {
    store: DualStore,
    users: Vec<User>,
}

impl DashboardService {
    /// Service over the given facade with the seeded account list.
    pub fn new(store: DualStore) -> Self {
        Self::with_users(store, seed_users())
    }

    /// Service with an explicit account list (for tests and future
    /// externally-provisioned credentials).
    pub fn with_users(store: DualStore, users: Vec<User>) -> Self {
        Self { store, users }
    }

    /// Authenticate a username/password pair.
    pub fn login(&self, username: &str, password: &str) -> Result<Session, HimayaError> {
        let session = login(&self.users, username, password)?;
        info!(username = %session.username, role = ?session.role, "login");
        Ok(session)
    }

    /// The all-zero record a new day's entry form starts from, with the
    /// catalog name filled in.
    pub fn blank_record(
        &self,
        session: &Session,
        wilaya_id: &str,
        date: &str,
    ) -> Result<WilayaRecord, HimayaError> {
        session.ensure_can_access(wilaya_id)?;
        validate_date(date)?;
        let name = wilaya_name(wilaya_id)
            .ok_or_else(|| ValidationError::UnknownWilaya(wilaya_id.to_string()))?;
        Ok(WilayaRecord::empty(wilaya_id, name, date))
    }

    /// Persist one day's record to both replicas.
    pub fn save_record(
        &self,
        session: &Session,
        record: &WilayaRecord,
    ) -> Result<(), HimayaError> {
        session.ensure_can_access(&record.id)?;
        if !is_known_wilaya(&record.id) {
            return Err(ValidationError::UnknownWilaya(record.id.clone()).into());
        }
        validate_date(&record.date)?;
        self.store.save(record)?;
        info!(wilaya = %record.id, date = %record.date, "record saved");
        Ok(())
    }

    /// Point lookup for one wilaya and date.
    pub fn record(
        &self,
        session: &Session,
        wilaya_id: &str,
        date: &str,
    ) -> Result<Option<WilayaRecord>, HimayaError> {
        session.ensure_can_access(wilaya_id)?;
        Ok(self.store.get(wilaya_id, date)?)
    }

    /// Every stored record for one wilaya, merged across replicas.
    pub fn records_for_wilaya(
        &self,
        session: &Session,
        wilaya_id: &str,
    ) -> Result<Vec<WilayaRecord>, HimayaError> {
        session.ensure_can_access(wilaya_id)?;
        Ok(self.store.list_all(wilaya_id)?)
    }

    /// The wilaya's history series.
    pub fn history(
        &self,
        session: &Session,
        wilaya_id: &str,
    ) -> Result<Vec<WilayaRecord>, HimayaError> {
        session.ensure_can_access(wilaya_id)?;
        Ok(self.store.history(wilaya_id)?)
    }

    /// National statistics over every wilaya the session may see. Admins
    /// aggregate the whole catalog; a wilaya account sees only its own
    /// region's totals.
    pub fn global_stats(&self, session: &Session) -> Result<GlobalStats, HimayaError> {
        let mut stats = GlobalStats::default();
        for (id, _) in WILAYAS {
            if !session.can_access(id) {
                continue;
            }
            for record in self.store.list_all(id)? {
                stats.add_record(&record);
            }
        }
        Ok(stats)
    }

    /// Render one record as a downloadable workbook. Returns the
    /// conventional file name and the xlsx bytes, or `None` when no record
    /// exists for that wilaya and date.
    pub fn export_workbook(
        &self,
        session: &Session,
        wilaya_id: &str,
        date: &str,
    ) -> Result<Option<(String, Vec<u8>)>, HimayaError> {
        let Some(record) = self.record(session, wilaya_id, date)? else {
            return Ok(None);
        };
        let bytes = write_workbook(&record)?;
        Ok(Some((export_file_name(&record.name, &record.date), bytes)))
    }

    /// Load a SQLite database image into the chosen replica(s). Admin only.
    /// Returns the number of records imported.
    pub fn import_database_image(
        &self,
        session: &Session,
        bytes: &[u8],
        target: ImportTarget,
    ) -> Result<usize, HimayaError> {
        session.ensure_admin()?;
        let count = match target {
            ImportTarget::KeyValue => import_into(self.store.replica(Replica::KeyValue), bytes)?,
            ImportTarget::Relational => {
                import_into(self.store.replica(Replica::Relational), bytes)?
            }
            ImportTarget::Both => {
                let count = import_into(self.store.replica(Replica::KeyValue), bytes)?;
                import_into(self.store.replica(Replica::Relational), bytes)?;
                count
            }
        };
        info!(count, ?target, "database image imported");
        Ok(count)
    }
}
