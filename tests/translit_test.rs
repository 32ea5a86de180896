use std::path::Path;

use tempfile::tempdir;
use translit::compiler::{CompileOptions, compile};
use translit::config::TransliteratorConfig;
use translit::storage::{FileStorage, MemoryStorage};
use translit::translit::Transliterator;

fn write_wordlist(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Compile a miniature Japanese dictionary set into `dir`.
fn compile_japanese(dir: &Path) {
    let normalize = write_wordlist(dir, "itaijidict.utf8", ";; variants\n国 國\nカ ｶ\n");
    let kanwa = write_wordlist(
        dir,
        "kakasidict.utf8",
        ";; readings\nにほん 日本\nこくみん 国民\nかk 書\nがっこう 学校\n",
    );
    let hepburn = write_wordlist(
        dir,
        "hepburndict.utf8",
        "ni に\nho ほ\nn ん\nko こ\nku く\nmi み\nka か\nki き\nga が\nkko っこ\nu う\nwa は\n",
    );

    let (builder, _) = compile(&[normalize], CompileOptions::default()).unwrap();
    builder.save_to_path(dir.join("normalize.ja")).unwrap();

    let (builder, stats) = compile(&[kanwa], CompileOptions { expand_suffixes: true }).unwrap();
    assert_eq!(stats.comments, 1);
    // 書 expands into one entry per kana of the `k` row.
    assert_eq!(stats.added, 3 + 8);
    builder.save_to_path(dir.join("kanwa.ja")).unwrap();

    let (builder, _) = compile(&[hepburn], CompileOptions::default()).unwrap();
    builder.save_to_path(dir.join("hepburn.ja")).unwrap();
}

#[test]
fn test_japanese_pipeline_from_files() {
    let dir = tempdir().unwrap();
    compile_japanese(dir.path());

    let config = TransliteratorConfig::japanese();
    for use_mmap in [false, true] {
        let mut config = config.clone();
        config.storage.use_mmap = use_mmap;
        let storage = FileStorage::open(dir.path(), config.storage.clone()).unwrap();
        let transliterator = Transliterator::from_config(&storage, &config).unwrap();

        assert_eq!(transliterator.transliterate("日本國民は", "ja"), "nihon kokumin wa");
        assert_eq!(transliterator.transliterate("学校", "ja"), "gakkou");
        assert_eq!(transliterator.transliterate("書く", "ja"), "kaku");
        assert_eq!(transliterator.transliterate("ｶ", "ja"), "カ");
    }
}

#[test]
fn test_pipeline_from_config_file() {
    let dir = tempdir().unwrap();
    let dicts = dir.path().join("dicts");
    std::fs::create_dir(&dicts).unwrap();
    compile_japanese(&dicts);

    let config_path = dir.path().join("translit.json");
    std::fs::write(
        &config_path,
        r#"{
            "dictionary_dir": "dicts",
            "fold_to_ascii": false,
            "languages": {
                "ja": [
                    { "dictionary": "kanwa.ja", "word_sep": " ", "node_cache_size": 2 }
                ]
            }
        }"#,
    )
    .unwrap();

    let config = TransliteratorConfig::load_from_file(&config_path).unwrap();
    let directory = config.dictionary_dir.clone().unwrap();
    assert_eq!(directory, dicts);

    let storage = FileStorage::open(&directory, config.storage.clone()).unwrap();
    let transliterator = Transliterator::from_config(&storage, &config).unwrap();
    assert_eq!(transliterator.transliterate("日本の学校", "ja"), "にほん の がっこう");
}

#[test]
fn test_pipeline_requires_every_dictionary() {
    let storage = MemoryStorage::new();
    let error = Transliterator::from_config(&storage, &TransliteratorConfig::japanese()).unwrap_err();
    assert!(error.to_string().contains("normalize.ja"));
}
