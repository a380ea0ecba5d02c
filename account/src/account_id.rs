use std::fmt::Display;

use uuid::Uuid;

pub const ACCOUNT_ID_REQUIRED: &str = "account id is required";

/// Opaque account identifier, assigned by the caller and immutable once an
/// account exists. Storage uses it as the primary key. The nil UUID is not a
/// valid id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct AccountId(Uuid);

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{}", ACCOUNT_ID_REQUIRED)]
pub struct MissingAccountId;

impl AccountId {
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl TryFrom<Uuid> for AccountId {
    type Error = MissingAccountId;

    fn try_from(value: Uuid) -> Result<Self, Self::Error> {
        match value.is_nil() {
            true => Err(MissingAccountId),
            false => Ok(Self(value)),
        }
    }
}

impl Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "sqlx")]
impl sqlx::Type<sqlx::Sqlite> for AccountId {
    fn type_info() -> <sqlx::Sqlite as sqlx::Database>::TypeInfo {
        <String as sqlx::Type<sqlx::Sqlite>>::type_info()
    }
}

#[cfg(feature = "sqlx")]
impl sqlx::Encode<'_, sqlx::Sqlite> for AccountId {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Sqlite as sqlx::Database>::ArgumentBuffer<'_>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        let text = self.0.to_string();
        <String as sqlx::Encode<sqlx::Sqlite>>::encode_by_ref(&text, buf)
    }
}

#[cfg(feature = "sqlx")]
impl sqlx::Decode<'_, sqlx::Sqlite> for AccountId {
    fn decode(
        value: <sqlx::Sqlite as sqlx::Database>::ValueRef<'_>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let value = <String as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        let uuid = Uuid::parse_str(&value)?;
        Self::try_from(uuid).map_err(|err| err.into())
    }
}
