use serde_json::json;

use crate::{
    error::{StoreError, StoreResult},
    models::ClassOption,
    store::DocumentStore,
};

use super::CLASSES;

pub async fn list(store: &dyn DocumentStore) -> StoreResult<Vec<ClassOption>> {
    store
        .list_documents(CLASSES, None)
        .await?
        .into_iter()
        .map(|doc| {
            let mut option: ClassOption =
                serde_json::from_value(serde_json::Value::Object(doc.fields))?;
            option.id = doc.id;
            Ok(option)
        })
        .collect()
}

/// Add a class option. Names are unique.
pub async fn create(store: &dyn DocumentStore, name: &str) -> StoreResult<ClassOption> {
    if list(store).await?.iter().any(|option| option.name == name) {
        return Err(StoreError::Conflict(format!("Class {name} already exists")));
    }

    let mut fields = crate::store::Fields::new();
    fields.insert("name".to_string(), json!(name));
    let id = store.add_document(CLASSES, fields).await?;

    Ok(ClassOption {
        id,
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryDocumentStore;

    #[tokio::test]
    async fn test_create_and_list() {
        let store = InMemoryDocumentStore::new();
        let six = create(&store, "Class 6").await.unwrap();
        create(&store, "Class 7").await.unwrap();

        let options = list(&store).await.unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0], six);
        assert_eq!(options[1].name, "Class 7");
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let store = InMemoryDocumentStore::new();
        create(&store, "Class 6").await.unwrap();
        assert!(matches!(
            create(&store, "Class 6").await,
            Err(StoreError::Conflict(_))
        ));
    }
}
