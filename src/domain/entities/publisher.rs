//! Publisher entity.

/// A website or app that serves ads and is reported on per advertiser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publisher {
    pub id: i64,
    pub name: String,
}

/// Input data for registering a publisher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPublisher {
    pub name: String,
}
