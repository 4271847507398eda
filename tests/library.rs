//! End-to-end tests for the record store: id assignment, CRUD semantics,
//! the delete cascade, the loader's failure taxonomy, and save/load round
//! trips. Every test works against real files under a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use mini_player::store::{ensure_store_files_in, LoadError, Library};
use mini_player::Song;

/// Instance document with ids 1,2,3,5,6,7,8 (4 was deleted at some point,
/// hence the counter at 9) and four playlist memberships.
const FIXTURE_INSTANCE: &str = r#"{
  "next_id": 9,
  "song": [
    { "id": 1, "title": "Song One", "artist": "Alice", "album": "First", "genre": "rock", "length": "3:40", "filename": "one.mp3" },
    { "id": 2, "title": "Song Two", "artist": "Alice", "album": "First", "genre": "rock", "length": "2:59", "filename": "two.mp3" },
    { "id": 3, "title": "Song Three", "artist": "Carol", "album": "Second", "genre": "jazz", "length": "5:12", "filename": "three.mp3" },
    { "id": 5, "title": "Song Five", "artist": "Carol", "album": "Second", "genre": "jazz", "length": "4:01", "filename": "five.mp3" },
    { "id": 6, "title": "Song Six", "artist": "Dave", "album": "Third", "genre": "folk", "length": "2:30", "filename": "six.mp3" },
    { "id": 7, "title": "Song Seven", "artist": "Dave", "album": "Third", "genre": "folk", "length": "3:03", "filename": "seven.mp3" },
    { "id": 8, "title": "Song Eight", "artist": "Dave", "album": "Third", "genre": "folk", "length": "6:47", "filename": "eight.mp3" }
  ],
  "playlist_song": [
    { "playlist_id": 1, "song_id": 1 },
    { "playlist_id": 1, "song_id": 2 },
    { "playlist_id": 2, "song_id": 2 },
    { "playlist_id": 2, "song_id": 8 }
  ]
}
"#;

fn default_song() -> Song {
    Song {
        id: 0,
        title: "Best Song".to_string(),
        artist: "Bob".to_string(),
        album: "Fire".to_string(),
        genre: "cool".to_string(),
        length: "123".to_string(),
        filename: "test.mp3".to_string(),
    }
}

/// Seed an empty store under `dir` and return the two file paths.
fn seed_empty(dir: &Path) -> (PathBuf, PathBuf) {
    ensure_store_files_in(dir).expect("failed to seed store files")
}

/// Seed the store, then replace the instance file with `instance`.
fn seed_with(dir: &Path, instance: &str) -> (PathBuf, PathBuf) {
    let (schema_path, data_path) = seed_empty(dir);
    fs::write(&data_path, instance).expect("failed to write instance fixture");
    (schema_path, data_path)
}

fn open_fixture(dir: &Path) -> Library {
    let (schema_path, data_path) = seed_with(dir, FIXTURE_INSTANCE);
    Library::open(&schema_path, &data_path).expect("fixture catalog should load")
}

#[test]
fn song_ids_sort_numerically_and_skip_the_deleted_id() {
    let dir = TempDir::new().unwrap();
    let library = open_fixture(dir.path());

    assert_eq!(
        library.song_ids(),
        vec!["1", "2", "3", "5", "6", "7", "8"]
    );
}

#[test]
fn empty_catalog_add_get_delete_cycle() {
    let dir = TempDir::new().unwrap();
    let (schema_path, data_path) = seed_empty(dir.path());
    let mut library = Library::open(&schema_path, &data_path).unwrap();

    let id = library.add_song(default_song());
    assert_eq!(id, 1);

    let expected = Song {
        id,
        ..default_song()
    };
    assert_eq!(library.get_song(id), Some(expected));

    assert!(library.delete_song(id));
    assert_eq!(library.get_song(id), None);
    assert!(!library.delete_song(id));
}

#[test]
fn added_ids_strictly_increase_even_across_deletes() {
    let dir = TempDir::new().unwrap();
    let (schema_path, data_path) = seed_empty(dir.path());
    let mut library = Library::open(&schema_path, &data_path).unwrap();

    let first = library.add_song(default_song());
    let second = library.add_song(default_song());
    assert!(library.delete_song(second));
    let third = library.add_song(default_song());
    assert!(library.delete_song(first));
    let fourth = library.add_song(default_song());

    assert_eq!(vec![first, second, third, fourth], vec![1, 2, 3, 4]);
}

#[test]
fn add_song_ignores_caller_supplied_id() {
    let dir = TempDir::new().unwrap();
    let (schema_path, data_path) = seed_empty(dir.path());
    let mut library = Library::open(&schema_path, &data_path).unwrap();

    let mut song = default_song();
    song.id = 42;
    let id = library.add_song(song);

    assert_eq!(id, 1);
    assert_eq!(library.get_song(42), None);
}

#[test]
fn get_song_returns_none_for_any_missing_id() {
    let dir = TempDir::new().unwrap();
    let library = open_fixture(dir.path());

    assert_eq!(library.get_song(0), None);
    assert_eq!(library.get_song(-5), None);
    assert_eq!(library.get_song(4), None);
    assert_eq!(library.get_song(111), None);
}

#[test]
fn update_song_overwrites_every_field_except_id() {
    let dir = TempDir::new().unwrap();
    let mut library = open_fixture(dir.path());

    assert!(library.update_song(5, &default_song()));

    let expected = Song {
        id: 5,
        ..default_song()
    };
    assert_eq!(library.get_song(5), Some(expected));
}

#[test]
fn update_missing_song_returns_false_and_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut library = open_fixture(dir.path());

    let songs_before = library.songs();
    let memberships_before = library.memberships();

    // Id 4 sits inside the historical range but was deleted; 111 is out of
    // range entirely. Both count as nonexistent.
    assert!(!library.update_song(4, &default_song()));
    assert!(!library.update_song(111, &default_song()));

    assert_eq!(library.songs(), songs_before);
    assert_eq!(library.memberships(), memberships_before);
}

#[test]
fn delete_song_cascades_playlist_memberships() {
    let dir = TempDir::new().unwrap();
    let mut library = open_fixture(dir.path());
    assert_eq!(library.membership_count(), 4);

    assert!(library.delete_song(2));

    assert_eq!(library.get_song(2), None);
    assert_eq!(library.membership_count(), 2);
    assert!(library
        .memberships()
        .iter()
        .all(|membership| membership.song_id != 2));
}

#[test]
fn delete_missing_song_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let mut library = open_fixture(dir.path());

    let songs_before = library.songs();
    let memberships_before = library.memberships();

    assert!(!library.delete_song(4));
    assert!(!library.delete_song(111));

    assert_eq!(library.songs(), songs_before);
    assert_eq!(library.memberships(), memberships_before);
}

#[test]
fn delete_on_empty_catalog_does_not_panic() {
    let dir = TempDir::new().unwrap();
    let (schema_path, data_path) = seed_empty(dir.path());
    let mut library = Library::open(&schema_path, &data_path).unwrap();

    assert!(!library.delete_song(1));
    assert_eq!(library.song_count(), 0);
}

#[test]
fn save_then_load_round_trips_the_catalog() {
    let dir = TempDir::new().unwrap();
    let (schema_path, _) = seed_empty(dir.path());
    let mut library = open_fixture(dir.path());

    let new_id = library.add_song(default_song());
    assert!(library.add_song_to_playlist(3, new_id));

    let destination = dir.path().join("saved.json");
    library.save(&destination).expect("save should succeed");

    let reloaded = Library::open(&schema_path, &destination).expect("saved catalog should load");
    assert_eq!(reloaded.songs(), library.songs());
    assert_eq!(reloaded.memberships(), library.memberships());
    assert_eq!(reloaded.song_ids(), library.song_ids());
}

#[test]
fn autoincrement_counter_survives_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let (schema_path, data_path) = seed_with(dir.path(), FIXTURE_INSTANCE);
    let mut library = Library::open(&schema_path, &data_path).unwrap();

    // Delete the highest id, persist, reload. The counter must stay at 9;
    // deriving it from the live maximum would hand 8 out a second time.
    assert!(library.delete_song(8));
    library.save(&data_path).unwrap();

    let mut reloaded = Library::open(&schema_path, &data_path).unwrap();
    assert_eq!(reloaded.add_song(default_song()), 9);
}

#[test]
fn instance_without_counter_derives_it_from_live_ids() {
    let dir = TempDir::new().unwrap();
    let instance = r#"{
      "song": [
        { "id": 3, "title": "Only", "artist": "", "album": "", "genre": "", "length": "", "filename": "" }
      ],
      "playlist_song": []
    }"#;
    let (schema_path, data_path) = seed_with(dir.path(), instance);
    let mut library = Library::open(&schema_path, &data_path).unwrap();

    assert_eq!(library.add_song(default_song()), 4);
}

#[test]
fn missing_files_fail_with_missing_file() {
    let dir = TempDir::new().unwrap();
    let (schema_path, data_path) = seed_empty(dir.path());

    let absent = dir.path().join("nope.json");
    assert!(matches!(
        Library::open(&absent, &data_path),
        Err(LoadError::MissingFile { .. })
    ));
    assert!(matches!(
        Library::open(&schema_path, &absent),
        Err(LoadError::MissingFile { .. })
    ));
}

#[test]
fn unparseable_schema_fails_with_malformed_schema() {
    let dir = TempDir::new().unwrap();
    let (schema_path, data_path) = seed_empty(dir.path());
    fs::write(&schema_path, "{ not json").unwrap();

    assert!(matches!(
        Library::open(&schema_path, &data_path),
        Err(LoadError::MalformedSchema { .. })
    ));
}

#[test]
fn schema_without_the_song_table_fails_with_malformed_schema() {
    let dir = TempDir::new().unwrap();
    let (schema_path, data_path) = seed_empty(dir.path());
    fs::write(
        &schema_path,
        r#"{"tables":[{"name":"album","key":"id","columns":[{"name":"id","kind":"integer"}]}]}"#,
    )
    .unwrap();

    assert!(matches!(
        Library::open(&schema_path, &data_path),
        Err(LoadError::MalformedSchema { .. })
    ));
}

#[test]
fn unparseable_instance_fails_with_malformed_data() {
    let dir = TempDir::new().unwrap();
    let (schema_path, data_path) = seed_with(dir.path(), "not even json");

    assert!(matches!(
        Library::open(&schema_path, &data_path),
        Err(LoadError::MalformedData { .. })
    ));
}

#[test]
fn wrong_field_type_fails_with_schema_data_mismatch() {
    let dir = TempDir::new().unwrap();
    let instance = r#"{
      "song": [
        { "id": 1, "title": 7, "artist": "", "album": "", "genre": "", "length": "", "filename": "" }
      ]
    }"#;
    let (schema_path, data_path) = seed_with(dir.path(), instance);

    assert!(matches!(
        Library::open(&schema_path, &data_path),
        Err(LoadError::SchemaDataMismatch { .. })
    ));
}

#[test]
fn undeclared_field_fails_with_schema_data_mismatch() {
    let dir = TempDir::new().unwrap();
    let instance = r#"{
      "song": [
        { "id": 1, "title": "x", "artist": "", "album": "", "genre": "", "length": "", "filename": "", "rating": 5 }
      ]
    }"#;
    let (schema_path, data_path) = seed_with(dir.path(), instance);

    assert!(matches!(
        Library::open(&schema_path, &data_path),
        Err(LoadError::SchemaDataMismatch { .. })
    ));
}

#[test]
fn duplicate_song_ids_fail_with_malformed_data() {
    let dir = TempDir::new().unwrap();
    let instance = r#"{
      "song": [
        { "id": 1, "title": "a", "artist": "", "album": "", "genre": "", "length": "", "filename": "" },
        { "id": 1, "title": "b", "artist": "", "album": "", "genre": "", "length": "", "filename": "" }
      ]
    }"#;
    let (schema_path, data_path) = seed_with(dir.path(), instance);

    assert!(matches!(
        Library::open(&schema_path, &data_path),
        Err(LoadError::MalformedData { .. })
    ));
}

#[test]
fn dangling_membership_fails_with_malformed_data() {
    let dir = TempDir::new().unwrap();
    let instance = r#"{
      "song": [
        { "id": 1, "title": "a", "artist": "", "album": "", "genre": "", "length": "", "filename": "" }
      ],
      "playlist_song": [
        { "playlist_id": 1, "song_id": 99 }
      ]
    }"#;
    let (schema_path, data_path) = seed_with(dir.path(), instance);

    assert!(matches!(
        Library::open(&schema_path, &data_path),
        Err(LoadError::MalformedData { .. })
    ));
}

#[test]
fn membership_add_refuses_missing_song_and_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let mut library = open_fixture(dir.path());

    assert!(!library.add_song_to_playlist(9, 111));
    assert_eq!(library.membership_count(), 4);

    // Song 1 is already in playlist 1; re-adding reports success without
    // growing the table.
    assert!(library.add_song_to_playlist(1, 1));
    assert_eq!(library.membership_count(), 4);

    assert!(library.add_song_to_playlist(3, 1));
    assert_eq!(library.membership_count(), 5);
    assert_eq!(library.playlist_ids(), vec![1, 2, 3]);
}

#[test]
fn songs_in_playlist_come_back_in_id_order() {
    let dir = TempDir::new().unwrap();
    let mut library = open_fixture(dir.path());

    assert!(library.add_song_to_playlist(2, 3));
    let ids: Vec<i64> = library
        .songs_in_playlist(2)
        .iter()
        .map(|song| song.id)
        .collect();
    assert_eq!(ids, vec![2, 3, 8]);
}

#[test]
fn dump_all_walks_both_tables_field_by_field() {
    let dir = TempDir::new().unwrap();
    let library = open_fixture(dir.path());

    let entries: Vec<String> = library.dump_all().map(|entry| entry.to_string()).collect();

    // Seven fields per song, two per membership.
    assert_eq!(entries.len(), 7 * 7 + 4 * 2);
    assert_eq!(entries[0], "song[0] id=1");
    assert_eq!(entries[1], "song[0] title=Song One");
    assert!(entries
        .iter()
        .any(|line| line == "playlist_song[0] playlist_id=1"));
}

#[test]
fn save_fails_with_io_error_for_an_unwritable_destination() {
    let dir = TempDir::new().unwrap();
    let library = open_fixture(dir.path());

    let bad_destination = dir.path().join("no-such-dir").join("music.json");
    let err = library.save(&bad_destination).unwrap_err();
    assert!(err.to_string().contains("failed to write catalog"));

    // The in-memory catalog is untouched and a corrected retry succeeds.
    let good_destination = dir.path().join("music-copy.json");
    library.save(&good_destination).unwrap();
    assert_eq!(library.song_ids().len(), 7);
}
