use super::*;

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cardsmith-fonts-{tag}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn candidate_chain_appends_regular_list() {
    let bold: Vec<_> = FontWeight::Bold.candidates().collect();
    assert_eq!(bold.first(), Some(&"Inter-Bold.ttf"));
    assert_eq!(bold.len(), 8);
    assert_eq!(&bold[4..], FontWeight::Regular.own_candidates());

    let regular: Vec<_> = FontWeight::Regular.candidates().collect();
    assert_eq!(regular[0], "Inter-Regular.ttf");
    assert_eq!(regular[3], "arial.ttf");
}

#[test]
fn builtin_library_has_no_outline_faces() {
    let lib = FontLibrary::builtin();
    for w in FontWeight::ALL {
        assert!(lib.face(w).is_builtin());
    }
}

#[test]
fn index_is_case_insensitive_and_recursive() {
    let dir = scratch_dir("index");
    std::fs::create_dir_all(dir.join("truetype").join("dejavu")).unwrap();
    std::fs::write(dir.join("Arial.TTF"), b"x").unwrap();
    std::fs::write(dir.join("truetype").join("dejavu").join("DejaVuSans.ttf"), b"x").unwrap();
    std::fs::write(dir.join("notes.txt"), b"x").unwrap();

    let index = index_font_files(std::slice::from_ref(&dir));
    assert!(index.contains_key("arial.ttf"));
    assert_eq!(
        index.get("dejavusans.ttf"),
        Some(&dir.join("truetype").join("dejavu").join("DejaVuSans.ttf"))
    );
    assert!(!index.contains_key("notes.txt"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn shallower_file_wins_within_one_tree() {
    let dir = scratch_dir("depth");
    // "a" sorts before the top-level file but is one level deeper.
    std::fs::create_dir_all(dir.join("a").join("b")).unwrap();
    std::fs::write(dir.join("a").join("b").join("Inter-Bold.ttf"), b"deep").unwrap();
    std::fs::write(dir.join("a").join("Inter-Bold.ttf"), b"mid").unwrap();
    std::fs::write(dir.join("Inter-Bold.ttf"), b"top").unwrap();

    let index = index_font_files(std::slice::from_ref(&dir));
    assert_eq!(index.get("inter-bold.ttf"), Some(&dir.join("Inter-Bold.ttf")));

    std::fs::remove_file(dir.join("Inter-Bold.ttf")).unwrap();
    let index = index_font_files(std::slice::from_ref(&dir));
    assert_eq!(index.get("inter-bold.ttf"), Some(&dir.join("a").join("Inter-Bold.ttf")));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn search_stops_below_the_depth_limit() {
    let dir = scratch_dir("deep");
    let mut at_limit = dir.clone();
    for level in 0..MAX_FONT_DIR_DEPTH {
        at_limit = at_limit.join(format!("d{level}"));
    }
    let too_deep = at_limit.join("extra");
    std::fs::create_dir_all(&too_deep).unwrap();
    std::fs::write(at_limit.join("Inter-Regular.ttf"), b"x").unwrap();
    std::fs::write(too_deep.join("Inter-Bold.ttf"), b"x").unwrap();

    let index = index_font_files(std::slice::from_ref(&dir));
    assert!(index.contains_key("inter-regular.ttf"));
    assert!(!index.contains_key("inter-bold.ttf"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn bundled_fixture_fonts_resolve_to_outline_faces() {
    let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let lib = FontLibrary::discover(std::slice::from_ref(&fixtures));

    let FontFace::Outline(regular) = lib.face(FontWeight::Regular) else {
        panic!("regular weight should resolve to DejaVuSans.ttf");
    };
    assert_eq!(regular.path(), fixtures.join("fonts").join("DejaVuSans.ttf"));
    for w in [FontWeight::Semibold, FontWeight::Bold] {
        let FontFace::Outline(face) = lib.face(w) else {
            panic!("{w} weight should resolve to an outline face");
        };
        assert_eq!(face.path(), fixtures.join("fonts").join("DejaVuSans-Bold.ttf"));
    }
}

#[test]
fn earlier_directory_wins() {
    let a = scratch_dir("first");
    let b = scratch_dir("second");
    std::fs::write(a.join("arial.ttf"), b"a").unwrap();
    std::fs::write(b.join("arial.ttf"), b"b").unwrap();

    let index = index_font_files(&[a.clone(), b.clone()]);
    assert_eq!(index.get("arial.ttf"), Some(&a.join("arial.ttf")));

    std::fs::remove_dir_all(&a).unwrap();
    std::fs::remove_dir_all(&b).unwrap();
}

#[test]
fn unparsable_candidates_fall_back_to_builtin() {
    let dir = scratch_dir("broken");
    std::fs::write(dir.join("Inter-Regular.ttf"), b"not a font").unwrap();
    std::fs::write(dir.join("Inter-Bold.ttf"), b"still not a font").unwrap();

    let lib = FontLibrary::discover(std::slice::from_ref(&dir));
    for w in FontWeight::ALL {
        assert!(lib.face(w).is_builtin());
    }

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_directories_are_ignored() {
    let lib = FontLibrary::discover(&[PathBuf::from("/nonexistent/cardsmith/fonts")]);
    assert!(lib.face(FontWeight::Regular).is_builtin());
}

#[test]
fn garbage_bytes_are_not_a_face() {
    let err = OutlineFace::from_bytes(PathBuf::from("bad.ttf"), vec![0, 1, 2, 3]).unwrap_err();
    assert!(matches!(err, CardError::Validation(_)));
}
