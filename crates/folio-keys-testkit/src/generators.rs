//! Proptest strategies for property-based testing.

use folio_keys_core::{CollectionId, CollectionKey};
use proptest::prelude::*;

/// Strategy producing valid collection identifiers.
pub fn collection_id_strategy() -> impl Strategy<Value = CollectionId> {
    "[a-zA-Z0-9][a-zA-Z0-9._-]{0,31}"
        .prop_map(|s| CollectionId::new(s).expect("generated identifier is valid"))
}

/// Strategy producing arbitrary collection keys.
pub fn collection_key_strategy() -> impl Strategy<Value = CollectionKey> {
    any::<[u8; 32]>().prop_map(CollectionKey::from_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::TestFixture;
    use folio_keys_store::KeyStore;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_generated_identifiers_are_valid(id in collection_id_strategy()) {
            prop_assert!(!id.as_str().is_empty());
            prop_assert!(!id.as_str().contains('/'));
        }

        #[test]
        fn prop_store_round_trips_arbitrary_keys(
            id in collection_id_strategy(),
            key in collection_key_strategy(),
        ) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();

            rt.block_on(async {
                let fixture = TestFixture::new().unwrap();
                let store = fixture.open_store().unwrap();

                store.write(&id, &key).await.unwrap();
                let read = store.read(&id).await.unwrap();
                assert_eq!(read, key);
            });
        }
    }
}
