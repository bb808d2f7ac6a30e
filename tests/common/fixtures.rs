//! Static raw documents used across harnesses.
//!
//! The four `KBO_DAY_*` documents describe the same three games of
//! 2025-04-01 in different dialects:
//!
//! | away | home | score | status    |
//! |------|------|-------|-----------|
//! | KT   | LG   | 2-3   | completed |
//! | HH   | OB   | 1-1   | completed |
//! | SSG  | NC   |       | postponed |

/// Free-text score lines under an ISO date heading.
pub const KBO_DAY_PROSE: &str = "\
2025-04-01
KT 2-3 LG
한화 1-1 두산
SSG vs NC [우천취소]
";

/// Full 12-field records, home side first.
pub const KBO_DAY_PIPE_FULL: &str = "\
2025-04-01|1|LG|LG 트윈스|5|KT|KT 위즈|3|2|KBO|completed|0
2025-04-01|9|OB|두산 베어스|1|HH|한화 이글스|1|1|KBO|completed|1
2025-04-01|8|NC|NC 다이노스|4|SSG|SSG 랜더스|NULL|NULL|KBO|postponed|0
";

/// Compact records under a date line, visitor first.
pub const KBO_DAY_PIPE_COMPACT: &str = "\
2025-04-01
KT|2|3|LG
한화|1|1|두산
SSG|우천취소|우천취소|NC
";

/// Schedule table rows with a header row and a heading carrying the date.
pub const KBO_DAY_MARKUP: &str = r#"<h3>2025-04-01</h3>
<table>
<tr><th>시간</th><th>경기</th><th>구장</th><th>비고</th></tr>
<tr><td>18:30</td><td class="play"><span>KT</span><em><span class="lose">2</span><span>vs</span><span class="win">3</span></em><span>LG</span></td><td>잠실</td><td>-</td></tr>
<tr><td>18:30</td><td class="play"><span>한화</span><em><span>1</span><span>vs</span><span>1</span></em><span>두산</span></td><td>대전</td><td>-</td></tr>
<tr><td>18:30</td><td class="play"><span>SSG</span><em><span>vs</span></em><span>NC</span></td><td>창원</td><td>우천취소</td></tr>
</table>
"#;

/// Scoreboard blocks and a concatenated schedule line on the following day.
pub const KBO_NEXT_DAY_PROSE: &str = "\
2025-04-02
종료
KIA
패
스코어
0
삼성
승
스코어
5

14:00 롯데2vs12LG 리뷰 하이라이트 SS-T 잠실 -
";

/// Schedule stubs for 2025-04-03, later replaced by [`KBO_THIRD_DAY_RESULTS`].
pub const KBO_THIRD_DAY_SCHEDULE: &str = "\
2025-04-03
KT vs LG 18:30 @ 잠실
NC vs 두산 18:30 @ 잠실
";

pub const KBO_THIRD_DAY_RESULTS: &str = "\
2025-04-03
KT 0-4 LG
";

/// English score lines for two NPB days: interleague on the first, one game
/// in each conference and a stub on the second.
pub const NPB_PROSE: &str = "\
June 3
Softbank 2-4 Yomiuri (NPB) [IL] @ Tokyo Dome
Orix 3-3 Hanshin (NPB) [IL] @ Koshien
6月4日（水）
Hiroshima 1-0 Chunichi (NPB) [CL] @ Vantelin Dome
Nippon-Ham 5-2 Rakuten (NPB) [PL] @ Rakuten Mobile Park
Yakult vs DeNA 18:00 @ Yokohama Stadium
";

/// The first NPB day again, as 14-field records.
pub const NPB_PIPE_FULL: &str = "\
2025-06-03|1|YOG|読売ジャイアンツ|11|SOF|福岡ソフトバンクホークス|4|2|NPB|completed|0|東京ドーム|18:00
2025-06-03|2|HAN|阪神タイガース|12|ORI|オリックス・バファローズ|3|3|NPB|completed|1|甲子園|18:00
";

/// Lines no dialect should accept or recognise.
pub const NOISE_PROSE: &str = "\
2025-04-05
하이라이트
리뷰
Today's lineups are posted below.
";
