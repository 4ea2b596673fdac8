//! Response bodies for the record and metadata endpoints.

use crate::schema::{ColumnDescriptor, TableDescriptor};
use crate::value::{FieldValue, Record};
use serde::{Deserialize, Serialize};

/// `GET /api/:table` body.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page {
    pub data: Vec<Record>,
    pub total: u64,
}

/// `{ok: true}` with the key when one is known.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ack {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FieldValue>,
}

impl Ack {
    pub fn ok() -> Self {
        Ack { ok: true, id: None }
    }

    pub fn with_id(id: FieldValue) -> Self {
        Ack { ok: true, id: Some(id) }
    }
}

/// Result of a create or update: the re-read row, or an acknowledgement when it cannot be re-read.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Written {
    Ack(Ack),
    Row(Record),
}

impl Written {
    pub fn row(&self) -> Option<&Record> {
        match self {
            Written::Row(r) => Some(r),
            Written::Ack(_) => None,
        }
    }
}

/// `GET /api/meta/:table` body.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MetaBody {
    pub columns: Vec<ColumnDescriptor>,
    pub pk: Option<String>,
}

impl From<TableDescriptor> for MetaBody {
    fn from(d: TableDescriptor) -> Self {
        MetaBody {
            columns: d.columns,
            pk: d.primary_key,
        }
    }
}
