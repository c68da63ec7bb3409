//! sqlx bindings so `Optional<T>` can be bound and fetched like any column type
//!
//! Binding an absent value writes SQL `NULL`; reading `NULL` gives the
//! canonical absent value. `NULL` never reaches `T`'s own decoder.

use crate::optional::Optional;
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::sqlite::{Sqlite, SqliteTypeInfo};
use sqlx::{Database, Decode, Encode, Type, ValueRef};

impl<T: Type<Sqlite>> Type<Sqlite> for Optional<T> {
    fn type_info() -> SqliteTypeInfo {
        <T as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <T as Type<Sqlite>>::compatible(ty)
    }
}

impl<'q, T: Encode<'q, Sqlite>> Encode<'q, Sqlite> for Optional<T> {
    fn encode_by_ref(
        &self,
        buf: &mut <Sqlite as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        match self.as_nullable() {
            Some(value) => <T as Encode<'q, Sqlite>>::encode_by_ref(value, buf),
            None => Ok(IsNull::Yes),
        }
    }

    fn size_hint(&self) -> usize {
        self.as_nullable()
            .map_or(0, <T as Encode<'q, Sqlite>>::size_hint)
    }
}

impl<'r, T: Decode<'r, Sqlite>> Decode<'r, Sqlite> for Optional<T> {
    fn decode(value: <Sqlite as Database>::ValueRef<'r>) -> Result<Self, BoxDynError> {
        if value.is_null() {
            return Ok(Optional::none());
        }
        <T as Decode<'r, Sqlite>>::decode(value).map(Optional::of)
    }
}
