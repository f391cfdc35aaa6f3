use positioning_impl::position;

#[test]
fn latin_above_mark() {
    assert_eq!(position("a\u{0301}", ""), "2=0+500|7=1@-125,-4+0");
}

#[test]
fn latin_above_and_below_marks() {
    assert_eq!(
        position("a\u{0301}\u{0323}", ""),
        "2=0+500|\
         7=1@-125,-4+0|\
         8=3@-130,-12+0"
    );
}

#[test]
fn latin_stacked_above_marks() {
    assert_eq!(
        position("a\u{0301}\u{0301}", ""),
        "2=0+500|\
         7=1@-125,-4+0|\
         7=3@-125,188+0"
    );
}

#[test]
fn hebrew_qamats() {
    assert_eq!(position("\u{05D0}\u{05B8}", ""), "9=0+600|10=2@530,-22+0");
}

#[test]
fn hebrew_holam() {
    assert_eq!(position("\u{05D0}\u{05B9}", ""), "9=0+600|11=2@50,-9+0");
}

#[test]
fn arabic_fatha() {
    assert_eq!(position("\u{0644}\u{064E}", ""), "12=0+300|13=2@300,62+0");
}

#[test]
fn thai_mai_han_akat() {
    assert_eq!(position("\u{0E01}\u{0E31}", ""), "14=0+560|15=3@40,2+0");
}

#[test]
fn thai_sara_u() {
    assert_eq!(position("\u{0E01}\u{0E38}", ""), "14=0+560|16=3@20,-32+0");
}

#[test]
fn thai_phinthu() {
    assert_eq!(position("\u{0E01}\u{0E3A}", ""), "14=0+560|17=3@40,-12+0");
}

#[test]
fn double_above_mark() {
    assert_eq!(
        position("x\u{035D}x", ""),
        "3=0+520|\
         18=1@150,-59+0|\
         3=3+520"
    );
}

#[test]
fn spacing_mark_shifts_following_marks() {
    assert_eq!(
        position("a\u{0903}\u{0301}", ""),
        "2=0+500|\
         19=1+300|\
         7=4@-425,-4+0"
    );
}

#[test]
fn base_without_extents() {
    assert_eq!(position("b\u{0301}", ""), "4=0+540|7=1+0");
    assert_eq!(position("b\u{0300}", ""), "4=0+540|20=1@-200,0+0");
    assert_eq!(position("b\u{0300}", "--no-adjust-offsets"), "4=0+540|20=1+0");
    // Offsets are only adjusted in forward directions.
    assert_eq!(position("b\u{0300}", "--direction=rtl"), "4=0+540|20=1+0");
}

#[test]
fn vertical_marks() {
    assert_eq!(
        position("a\u{0301}", "--direction=ttb"),
        "2=0+0,-1000|7=1@375,996+0"
    );
}

#[test]
fn arabic_ligature_rtl() {
    assert_eq!(
        position(
            "\u{0644}\u{064E}\u{064E}\u{064E}",
            "--ligature=3 --components=1,2,3"
        ),
        "12=0+300|\
         13=2@400,62+0|\
         13=4@300,62+0|\
         13=6@200,62+0"
    );
}

#[test]
fn arabic_ligature_ltr() {
    assert_eq!(
        position(
            "\u{0644}\u{064E}\u{064E}\u{064E}",
            "--direction=ltr --ligature=3 --components=1,2,3"
        ),
        "12=0+300|\
         13=2@-100,62+0|\
         13=4@0,62+0|\
         13=6@100,62+0"
    );
}

#[test]
fn stray_ligature_marks_stack_on_the_last_component() {
    assert_eq!(
        position(
            "\u{0644}\u{064E}\u{064E}",
            "--ligature=3 --components=0,9"
        ),
        "12=0+300|\
         13=2@200,62+0|\
         13=4@200,184+0"
    );
}

#[test]
fn indic_scripts_skip_mark_positioning() {
    assert_eq!(position("a\u{0301}", "--script=deva"), "2=0+500|7=1+0");
    assert_eq!(
        position("a\u{0301}", "--script=deva --mark-positioning=1"),
        "2=0+500|7=1@-125,-4+0"
    );
    assert_eq!(position("a\u{0301}", "--mark-positioning=0"), "2=0+500|7=1+0");
}

#[test]
fn glyph_flags() {
    assert_eq!(
        position("a\u{0301}x", "--show-flags"),
        "2=0+500|7=1@-125,-4+0#3|3=3+520"
    );
}

#[test]
fn absolute_positions() {
    assert_eq!(position("a\u{0301}", "--ned"), "2|7@375,-4");
}

#[test]
fn no_positions() {
    assert_eq!(position("a\u{0301}", "--no-positions"), "2=0|7=1");
}

#[test]
fn em_spaces() {
    assert_eq!(
        position("a\u{2003}a\u{2009}a", ""),
        "2=0+500|\
         1=1+1000|\
         2=4+500|\
         1=5+200|\
         2=8+500"
    );
}

#[test]
fn em_spaces_with_another_upem() {
    assert_eq!(position("\u{2004}", "--upem=2048"), "1=0+683");
}

#[test]
fn figure_and_punctuation_spaces() {
    assert_eq!(position("\u{2007}\u{2008}", ""), "1=0+550|1=3+200");
}

#[test]
fn narrow_space() {
    assert_eq!(position("\u{202F}", ""), "1=0+125");
}

#[test]
fn regular_spaces_keep_their_width() {
    assert_eq!(position("a a", ""), "2=0+500|1=1+250|2=2+500");
}

#[test]
fn vertical_spaces() {
    assert_eq!(
        position("\u{2003}\u{2002}", "--direction=ttb"),
        "1=0+0,-1000|1=3+0,-500"
    );
}

#[test]
fn space_fallback_disabled() {
    assert_eq!(position("\u{2003}", "--no-space-fallback"), "1=0+250");
}
