//! リポジトリの統合テスト
//!
//! 読み込み・初期データ・件数上限・書き込み失敗時の動作を検証

use suivi_candidatures::error::SuiviError;
use suivi_candidatures::repository::{LoadSource, Repository};
use suivi_candidatures::store::{MemoryStore, Persistence, StoreAdapter};
use suivi_candidatures_common::{
    decode_records, encode_records, seed_records, RecordDraft, Reponse, Visite,
};

const KEY: &str = "candidatures_restaurants_v3";

fn draft(name: &str) -> RecordDraft {
    RecordDraft {
        restaurant: name.to_string(),
        ..RecordDraft::blank()
    }
}

fn repo_with(store: &MemoryStore, max: usize) -> Repository {
    let adapter = StoreAdapter::new(Box::new(store.clone()), KEY);
    Repository::initialize(adapter, max).0
}

/// 保存データがなければ初期データを作成して保存
#[test]
fn test_empty_store_is_seeded_and_persisted() {
    let store = MemoryStore::new();
    let adapter = StoreAdapter::new(Box::new(store.clone()), KEY);
    let (repo, report) = Repository::initialize(adapter, 100);

    assert_eq!(report.source, LoadSource::Seeded);
    assert_eq!(repo.len(), 10);
    let stored = decode_records(&store.raw(KEY).expect("初期データが保存されていない")).unwrap();
    assert_eq!(stored, repo.records());
}

/// 追加は末尾に1件増え、再読み込みでも同じ内容
#[test]
fn test_create_appends_and_round_trips() {
    let store = MemoryStore::new();
    let mut repo = repo_with(&store, 100);

    let (id, persistence) = repo.create(draft("Septime")).expect("追加に失敗");
    assert_eq!(persistence, Persistence::Durable);
    assert_eq!(repo.len(), 11);
    assert_eq!(repo.records().last().map(|r| r.id), Some(id));

    // 保存されたJSONはメモリ上のリストと1バイトも違わない
    let raw = store.raw(KEY).expect("保存されていない");
    assert_eq!(raw, encode_records(repo.records()).unwrap());

    let reloaded = repo_with(&store, 100);
    assert_eq!(reloaded.records(), repo.records());
    assert_eq!(encode_records(reloaded.records()).unwrap(), raw);
    assert_eq!(store.raw(KEY).as_deref(), Some(raw.as_str()));
}

/// 上限を超えて読み込まれたリストでも、上限以降の位置を編集できる
#[test]
fn test_update_beyond_cap_index() {
    let mut records = seed_records();
    records.extend(seed_records().into_iter().take(2));
    let store = MemoryStore::new();
    store.insert_raw(KEY, &encode_records(&records).unwrap());
    let mut repo = repo_with(&store, 10);
    assert_eq!(repo.len(), 12);

    assert!(matches!(
        repo.create(draft("Septime")),
        Err(SuiviError::CapacityReached { max: 10 })
    ));

    let mut edited = RecordDraft::from_record(&repo.records()[11]);
    edited.reponse = Reponse::Positive;
    let persistence = repo.update(11, edited).expect("上限以降の位置でも編集できる");
    assert!(persistence.is_durable());
    assert_eq!(repo.records()[11].reponse, Reponse::Positive);
    assert_eq!(repo.len(), 12);
}

/// 空の店名は拒否され、件数は変わらない
#[test]
fn test_create_rejects_blank_restaurant() {
    let store = MemoryStore::new();
    let mut repo = repo_with(&store, 100);

    let result = repo.create(draft("   "));
    assert!(matches!(result, Err(SuiviError::EmptyRestaurant)));
    assert_eq!(repo.len(), 10);
}

/// 上限到達後の追加は拒否、編集は可能
#[test]
fn test_capacity_limits_create_but_not_update() {
    let store = MemoryStore::new();
    let mut repo = repo_with(&store, 11);

    repo.create(draft("Septime")).expect("11件目は追加できる");
    assert!(repo.is_full());

    let err = repo.create(draft("Clown Bar")).unwrap_err();
    assert!(matches!(err, SuiviError::CapacityReached { max: 11 }));
    assert_eq!(err.to_string(), "Limite atteinte : 11 candidatures max");
    assert_eq!(repo.len(), 11);

    let mut edited = RecordDraft::from_record(&repo.records()[0]);
    edited.visite = Visite::Non;
    repo.update(0, edited).expect("上限でも編集はできる");
    assert_eq!(repo.records()[0].visite, Visite::Non);
}

/// 編集はIDと位置を維持する
#[test]
fn test_update_keeps_id_and_position() {
    let store = MemoryStore::new();
    let mut repo = repo_with(&store, 100);
    let id = repo.records()[3].id;

    let mut edited = RecordDraft::from_record(&repo.records()[3]);
    edited.commentaires = "relancer en janvier".into();
    repo.update(3, edited).unwrap();

    assert_eq!(repo.records()[3].id, id);
    assert_eq!(repo.records()[3].restaurant, "Pantagruel");
    assert_eq!(repo.records()[3].commentaires, "relancer en janvier");
}

#[test]
fn test_update_out_of_range() {
    let store = MemoryStore::new();
    let mut repo = repo_with(&store, 100);

    let result = repo.update(42, draft("Septime"));
    assert!(matches!(
        result,
        Err(SuiviError::IndexOutOfRange { index: 42, len: 10 })
    ));
}

/// 削除は他のレコードの順序を変えない
#[test]
fn test_delete_preserves_order() {
    let store = MemoryStore::new();
    let mut repo = repo_with(&store, 100);
    let before: Vec<_> = repo.records().iter().map(|r| r.restaurant.clone()).collect();

    let (removed, persistence) = repo.delete(2).unwrap();
    assert_eq!(removed.restaurant, "Frederic Simonin");
    assert!(persistence.is_durable());

    let after: Vec<_> = repo.records().iter().map(|r| r.restaurant.clone()).collect();
    let mut expected = before;
    expected.remove(2);
    assert_eq!(after, expected);

    let stored = decode_records(&store.raw(KEY).unwrap()).unwrap();
    assert_eq!(stored.len(), 9);
}

#[test]
fn test_delete_out_of_range() {
    let store = MemoryStore::new();
    let mut repo = repo_with(&store, 100);
    assert!(repo.delete(10).is_err());
    assert_eq!(repo.len(), 10);
}

/// 書き込み失敗時はメモリ上の変更を維持して MemoryOnly
#[test]
fn test_write_failure_keeps_change_in_memory() {
    let store = MemoryStore::new();
    let mut repo = repo_with(&store, 100);
    store.set_fail_writes(true);

    let (id, persistence) = repo.create(draft("Septime")).unwrap();
    assert_eq!(persistence, Persistence::MemoryOnly);
    assert!(repo.find(id).is_some());

    let stored = decode_records(&store.raw(KEY).unwrap()).unwrap();
    assert_eq!(stored.len(), 10);
}

/// ストア不可なら初期データをメモリのみで使う
#[test]
fn test_unavailable_store_seeds_in_memory() {
    let adapter = StoreAdapter::memory_only(KEY);
    let (mut repo, report) = Repository::initialize(adapter, 100);

    assert_eq!(report.source, LoadSource::SeededInMemory);
    assert_eq!(repo.len(), 10);
    assert!(!repo.is_durable());

    let (_, persistence) = repo.create(draft("Septime")).unwrap();
    assert_eq!(persistence, Persistence::MemoryOnly);
    assert_eq!(repo.len(), 11);
}

/// 破損データは上書きせず初期データで継続
#[test]
fn test_corrupted_data_falls_back_without_overwrite() {
    let store = MemoryStore::new();
    store.insert_raw(KEY, "{not json");
    let adapter = StoreAdapter::new(Box::new(store.clone()), KEY);
    let (repo, report) = Repository::initialize(adapter, 100);

    assert_eq!(report.source, LoadSource::Fallback);
    assert!(report.error.is_some());
    assert_eq!(repo.len(), 10);
    assert_eq!(store.raw(KEY).as_deref(), Some("{not json"));
}

/// 再読み込みで破損していた場合は直前のリストを維持
#[test]
fn test_reload_failure_keeps_previous_list() {
    let store = MemoryStore::new();
    let mut repo = repo_with(&store, 100);
    repo.create(draft("Septime")).unwrap();

    store.insert_raw(KEY, "[1, 2");
    let report = repo.reload();
    assert_eq!(report.source, LoadSource::Fallback);
    assert_eq!(repo.len(), 11);
}

/// IDなしの旧データは採番して保存し直す
#[test]
fn test_legacy_records_get_ids() {
    let store = MemoryStore::new();
    store.insert_raw(
        KEY,
        r#"[{"restaurant":"Le Faham","dateEnvoi":"2024-12-29","visite":"oui","reponse":"","lat":48.8534,"lng":2.3488},
            {"restaurant":"Granit","lat":"","lng":null}]"#,
    );
    let adapter = StoreAdapter::new(Box::new(store.clone()), KEY);
    let (repo, report) = Repository::initialize(adapter, 100);

    assert_eq!(report.source, LoadSource::Stored);
    assert_eq!(repo.len(), 2);
    assert_ne!(repo.records()[0].id, repo.records()[1].id);
    assert_eq!(repo.records()[0].visite, Visite::Oui);
    assert!(repo.records()[1].location().is_none());

    let stored = decode_records(&store.raw(KEY).unwrap()).unwrap();
    assert_eq!(stored[0].id, repo.records()[0].id);
}

/// 空配列は保存済みデータとして扱う（初期データで上書きしない）
#[test]
fn test_empty_list_is_respected() {
    let store = MemoryStore::new();
    store.insert_raw(KEY, "[]");
    let repo = repo_with(&store, 100);
    assert!(repo.is_empty());
}

/// null を含む保存データも保存済みとして読み込む（初期データで置き換えない）
#[test]
fn test_null_fields_do_not_discard_stored_list() {
    let store = MemoryStore::new();
    store.insert_raw(KEY, r#"[{"restaurant":"A","visite":null},{"restaurant":"B","chef":null}]"#);
    let adapter = StoreAdapter::new(Box::new(store.clone()), KEY);
    let (repo, report) = Repository::initialize(adapter, 100);

    assert_eq!(report.source, LoadSource::Stored);
    assert_eq!(repo.len(), 2);
    assert_eq!(repo.records()[0].restaurant, "A");
    assert_eq!(repo.records()[0].visite, Visite::Pending);
    assert_eq!(repo.records()[1].chef, "");
}

/// 全件削除後に保存データが壊れても、空のリストを維持する
#[test]
fn test_reload_failure_keeps_empty_list() {
    let store = MemoryStore::new();
    store.insert_raw(KEY, "[]");
    let mut repo = repo_with(&store, 100);
    assert!(repo.is_empty());

    store.insert_raw(KEY, "{corrompu");
    let report = repo.reload();
    assert_eq!(report.source, LoadSource::Fallback);
    assert_eq!(report.count, 0);
    assert!(repo.is_empty());
}
