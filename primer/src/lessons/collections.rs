//! 표준 컬렉션: `Vec`, UTF-8 `String`, `HashMap` 과 그 친구들

use crate::curriculum::{Lesson, PrimerError};
use crate::transcript::Transcript;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

pub struct Collections;

/// entry API 로 채팅 메시지의 단어를 센다
pub fn count_words(messages: &[&str]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for message in messages {
        for word in message.split_whitespace() {
            *counts.entry(word.to_lowercase()).or_insert(0) += 1;
        }
    }
    counts
}

/// 점수가 높은 순으로 정렬한 플레이어. 동점이면 이름 순.
pub fn leaderboard(scores: &HashMap<String, u32>) -> Vec<(String, u32)> {
    let mut ranked: BTreeMap<(std::cmp::Reverse<u32>, String), ()> = BTreeMap::new();
    for (name, score) in scores {
        ranked.insert((std::cmp::Reverse(*score), name.clone()), ());
    }
    ranked
        .into_keys()
        .map(|(score, name)| (name, score.0))
        .collect()
}

/// 먼저 온 순서대로 짝을 짓는다. 홀수로 남은 플레이어는 계속 기다린다.
pub fn matchmake(queue: &mut VecDeque<String>) -> Vec<(String, String)> {
    let mut matches = Vec::new();
    while queue.len() >= 2 {
        if let (Some(a), Some(b)) = (queue.pop_front(), queue.pop_front()) {
            matches.push((a, b));
        }
    }
    matches
}

/// 차단된 이름과 중복 이름을 버리고 처음 나온 것을 순서대로 남긴다
pub fn admit(names: &[&str], banned: &HashSet<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .filter(|name| !banned.contains(*name))
        .filter(|name| seen.insert(**name))
        .map(|name| name.to_string())
        .collect()
}

impl Lesson for Collections {
    fn number(&self) -> u32 {
        10
    }

    fn slug(&self) -> &'static str {
        "collections"
    }

    fn title(&self) -> &'static str {
        "Collections"
    }

    fn cpp_contrasts(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("std::vector<int> v = {1, 2, 3};", "let v = vec![1, 2, 3];"),
            (
                "v.at(i) throws and v[i] is unchecked",
                "v.get(i) returns Option and v[i] panics when out of range",
            ),
            (
                "std::string holds arbitrary bytes",
                "String is always UTF-8 and s[0] does not compile",
            ),
            ("std::unordered_map and std::map", "HashMap and BTreeMap"),
            (
                "std::deque, std::unordered_set, std::priority_queue",
                "VecDeque, HashSet, BinaryHeap",
            ),
            ("if (m.find(k) == m.end()) m[k] = v;", "m.entry(k).or_insert(v)"),
        ]
    }

    fn run(&self, out: &mut Transcript) -> Result<(), PrimerError> {
        out.heading("Vec");
        let mut ids: Vec<u32> = Vec::with_capacity(4);
        ids.push(3);
        ids.extend([1, 2]);
        ids.sort_unstable();
        out.line(format!("{:?} len {} capacity >= {}", ids, ids.len(), ids.capacity()));
        out.line(format!("ids.get(10) = {:?}; indexing would panic", ids.get(10)));
        ids.retain(|id| id % 2 == 1);
        out.line(format!("retain odd ids: {:?}", ids));

        out.heading("String");
        let mut greeting = String::from("안녕");
        greeting.push_str(", world");
        out.line(format!(
            "\"{}\" is {} bytes but {} chars; &s[0..1] would panic mid-character",
            greeting,
            greeting.len(),
            greeting.chars().count()
        ));
        let first: String = greeting.chars().take(2).collect();
        out.line(format!("iterate chars instead: {}", first));

        out.heading("HashMap");
        let counts = count_words(&["gg wp", "GG", "wp all"]);
        let mut pairs: Vec<_> = counts.iter().collect();
        pairs.sort();
        out.line(format!("word counts {:?}", pairs));

        let mut scores = HashMap::new();
        scores.insert("ferris".to_string(), 30);
        scores.insert("corro".to_string(), 50);
        scores.insert("crab".to_string(), 30);
        out.line(format!("leaderboard {:?}", leaderboard(&scores)));

        out.heading("Other collections");
        let mut queue: VecDeque<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let matches = matchmake(&mut queue);
        out.line(format!("VecDeque matchmaking {:?}, still waiting {:?}", matches, queue));

        let banned: HashSet<&str> = ["griefer"].into_iter().collect();
        out.line(format!(
            "HashSet filtering {:?}",
            admit(&["ann", "griefer", "bo", "ann"], &banned)
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words_is_case_insensitive() {
        let counts = count_words(&["GG wp", "gg"]);
        assert_eq!(counts.get("gg"), Some(&2));
        assert_eq!(counts.get("wp"), Some(&1));
    }

    #[test]
    fn test_leaderboard_order() {
        let mut scores = HashMap::new();
        scores.insert("b".to_string(), 10);
        scores.insert("a".to_string(), 10);
        scores.insert("c".to_string(), 20);
        assert_eq!(
            leaderboard(&scores),
            vec![
                ("c".to_string(), 20),
                ("a".to_string(), 10),
                ("b".to_string(), 10)
            ]
        );
    }

    #[test]
    fn test_matchmake_leaves_odd_player() {
        let mut queue: VecDeque<String> = ["x", "y", "z"].iter().map(|s| s.to_string()).collect();
        let matches = matchmake(&mut queue);
        assert_eq!(matches, vec![("x".to_string(), "y".to_string())]);
        assert_eq!(queue.front().map(String::as_str), Some("z"));
    }

    #[test]
    fn test_admit() {
        let banned: HashSet<&str> = ["bad"].into_iter().collect();
        assert_eq!(admit(&["a", "bad", "a", "b"], &banned), vec!["a", "b"]);
    }

    #[test]
    fn test_utf8_lengths() {
        let s = "안녕";
        assert_eq!(s.len(), 6);
        assert_eq!(s.chars().count(), 2);
    }
}
