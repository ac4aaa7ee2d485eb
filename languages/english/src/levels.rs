/// Exam word lists a lexicon entry can be tagged with
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExamLevel {
    Zhongkao,
    Gaokao,
    Cet4,
    Cet6,
    Kaoyan,
    Toefl,
    Ielts,
    Gre,
}

impl ExamLevel {
    /// Parse a lexicon tag code (`gk`, `cet4`, ...)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "zk" => Some(ExamLevel::Zhongkao),
            "gk" => Some(ExamLevel::Gaokao),
            "cet4" => Some(ExamLevel::Cet4),
            "cet6" => Some(ExamLevel::Cet6),
            "ky" => Some(ExamLevel::Kaoyan),
            "toefl" => Some(ExamLevel::Toefl),
            "ielts" => Some(ExamLevel::Ielts),
            "gre" => Some(ExamLevel::Gre),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ExamLevel::Zhongkao => "zk",
            ExamLevel::Gaokao => "gk",
            ExamLevel::Cet4 => "cet4",
            ExamLevel::Cet6 => "cet6",
            ExamLevel::Kaoyan => "ky",
            ExamLevel::Toefl => "toefl",
            ExamLevel::Ielts => "ielts",
            ExamLevel::Gre => "gre",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            ExamLevel::Zhongkao => "中考",
            ExamLevel::Gaokao => "高考",
            ExamLevel::Cet4 => "四级",
            ExamLevel::Cet6 => "六级",
            ExamLevel::Kaoyan => "考研",
            ExamLevel::Toefl => "托福",
            ExamLevel::Ielts => "雅思",
            ExamLevel::Gre => "GRE",
        }
    }
}

/// Known levels among `tags`, easiest first, without repeats
pub fn levels_for_tags<S: AsRef<str>>(tags: &[S]) -> Vec<ExamLevel> {
    let mut levels: Vec<ExamLevel> = tags
        .iter()
        .filter_map(|t| ExamLevel::from_tag(t.as_ref()))
        .collect();
    levels.sort();
    levels.dedup();
    levels
}

/// Display labels for `tags`, easiest first
pub fn level_labels<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    levels_for_tags(tags)
        .into_iter()
        .map(|l| l.label().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_difficulty_and_skips_unknown() {
        let tags = ["gre", "cet4", "GK", "weird", "cet4"];
        assert_eq!(
            levels_for_tags(&tags),
            vec![ExamLevel::Gaokao, ExamLevel::Cet4, ExamLevel::Gre]
        );
        assert_eq!(level_labels(&tags), vec!["高考", "四级", "GRE"]);
    }

    #[test]
    fn tag_round_trip() {
        for level in [ExamLevel::Zhongkao, ExamLevel::Kaoyan, ExamLevel::Ielts] {
            assert_eq!(ExamLevel::from_tag(level.tag()), Some(level));
        }
    }
}
