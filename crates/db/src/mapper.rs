//! Conversion between persisted records and transfer objects.
//!
//! Mapping is pure. `None` maps to `None`, collections keep their order, and
//! embedded relations are mapped with the same contract.

/// A transfer type with a persisted counterpart.
pub trait RecordMapper: Sized {
    type Record;

    fn to_transfer(record: &Self::Record) -> Self;

    fn to_persisted(&self) -> Self::Record;
}

/// Map an optional record.
pub fn transfer_opt<M: RecordMapper>(record: Option<&M::Record>) -> Option<M> {
    record.map(M::to_transfer)
}

/// Map an optional transfer object.
pub fn persisted_opt<M: RecordMapper>(transfer: Option<&M>) -> Option<M::Record> {
    transfer.map(M::to_persisted)
}

/// Map records in order.
pub fn transfer_all<M: RecordMapper>(records: &[M::Record]) -> Vec<M> {
    records.iter().map(M::to_transfer).collect()
}

/// Map transfer objects in order.
pub fn persisted_all<M: RecordMapper>(transfers: &[M]) -> Vec<M::Record> {
    transfers.iter().map(M::to_persisted).collect()
}
