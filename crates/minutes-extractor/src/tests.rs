//! End-to-end scenarios for direct extraction

#[cfg(test)]
mod tests {
    use crate::{orchestrator, ExtractorConfig};
    use minutes_domain::{MeetingRecord, MeetingType, Topic, DEFAULT_PREPARATION, UNSPECIFIED};

    fn extract(text: &str) -> MeetingRecord {
        orchestrator::extract(text, &ExtractorConfig::default()).record
    }

    #[test]
    fn test_project_meeting_with_ordinal_topics() {
        let text = "明天上午10点在三楼会议室召开项目进度会议，参会人员：张三，李四，王五；\
会议大概开1小时；一是当前进度，由张三负责；二是遇到的问题，李四需要准备相关资料；三是下一步计划，王五负责。";
        let record = extract(text);

        assert_eq!(record.meeting_type, MeetingType::Project);
        assert_eq!(record.theme, "项目进度");
        assert_eq!(record.host, UNSPECIFIED);
        assert!(record.location.contains("三楼会议室"));
        assert_eq!(record.attendees, "张三，李四，王五");
        assert!(record.duration.contains("1小时"));

        assert_eq!(record.topics.len(), 3);
        assert_eq!(record.topics[0].text, "当前进度");
        assert_eq!(record.topics[0].owner, "张三");
        assert_eq!(record.topics[0].preparation, DEFAULT_PREPARATION);
        assert_eq!(record.topics[1].owner, "李四");
        assert!(record.topics[1].preparation.contains("相关资料"));
        assert_eq!(record.topics[2].owner, "王五");
        assert_eq!(record.topics[2].preparation, DEFAULT_PREPARATION);
    }

    #[test]
    fn test_enumerated_intro_meeting() {
        let text = "明天上午10点在三楼会议室开个关于项目进度的会议，参加的有张三、李四和王五，\
会议大概开1小时，主要讨论三个议题：一是项目当前进度，由张三负责；二是遇到的问题，由李四准备相关资料；三是下一步计划，王五负责。";
        let record = extract(text);

        assert_eq!(record.theme, "项目进度");
        assert_eq!(record.location, "三楼会议室");
        assert_eq!(record.attendees, "张三，李四，王五");
        assert_eq!(record.duration, "1小时");
        let texts: Vec<_> = record.topics.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["项目当前进度", "遇到的问题", "下一步计划"]);
        assert_eq!(record.topics[1].owner, "李四");
        assert_eq!(record.topics[1].preparation, "相关资料");
    }

    #[test]
    fn test_preparation_does_not_leak_across_topics() {
        let record = extract("一是预算审核，由张三负责，李四准备报表初稿；二是市场推广，由李四负责。");

        assert_eq!(record.topics.len(), 2);
        assert_eq!(record.topics[0].owner, "张三");
        assert_eq!(record.topics[0].preparation, DEFAULT_PREPARATION);
        assert_eq!(record.topics[1].owner, "李四");
        assert_eq!(record.topics[1].preparation, DEFAULT_PREPARATION);
    }

    #[test]
    fn test_later_owner_named_in_earlier_topic() {
        let record = extract("一是预算审核，会前准备王五的报表；二是市场推广，由王五负责。");

        assert_eq!(record.topics.len(), 2);
        assert_eq!(record.topics[0].text, "预算审核");
        assert_eq!(record.topics[0].owner, UNSPECIFIED);
        assert_eq!(record.topics[0].preparation, DEFAULT_PREPARATION);
        assert_eq!(record.topics[1].owner, "王五");
        assert_eq!(record.topics[1].preparation, DEFAULT_PREPARATION);
    }

    #[test]
    fn test_ownerless_preparation_stays_unassigned() {
        let record = extract("一是预算审核，提前准备报表。");

        assert_eq!(record.topics.len(), 1);
        assert_eq!(record.topics[0].owner, UNSPECIFIED);
        assert_eq!(record.topics[0].preparation, DEFAULT_PREPARATION);
    }

    #[test]
    fn test_topics_one_per_sentence_after_intro() {
        let record = extract(
            "会议主要讨论三个议题：\n1. 项目进度，由张三负责。\n2. 遇到的问题，李四需要准备相关资料。\n3. 下一步计划，王五负责。",
        );

        let texts: Vec<_> = record.topics.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["项目进度", "遇到的问题", "下一步计划"]);
        assert_eq!(record.topics[0].owner, "张三");
        assert_eq!(record.topics[1].owner, "李四");
        assert_eq!(record.topics[1].preparation, "相关资料");
        assert_eq!(record.topics[2].owner, "王五");
    }

    #[test]
    fn test_attendee_qualifiers_survive_dedup() {
        let record = extract("参会人员：李明，市场部的李明，王五。");
        assert_eq!(record.attendees, "市场部的李明，王五");
    }

    #[test]
    fn test_default_record_round_trips() {
        let default = MeetingRecord::default();
        assert_eq!(extract(&default.to_labeled_text()), default);
    }

    #[test]
    fn test_populated_record_round_trips() {
        let mut first = Topic::new("项目当前进度");
        first.owner = "张三".to_string();
        first.preparation = "相关资料".to_string();
        let mut second = Topic::new("下一步计划");
        second.owner = "李四".to_string();

        let record = MeetingRecord {
            theme: "项目进度".to_string(),
            host: "王经理".to_string(),
            location: "三楼会议室".to_string(),
            attendees: "张三，李四".to_string(),
            duration: "1小时".to_string(),
            meeting_type: MeetingType::Project,
            topics: vec![first, second],
        };

        let extracted = extract(&record.to_labeled_text());
        assert_eq!(extracted.scalar_fields(), record.scalar_fields());
        assert_eq!(extracted.topics, record.topics);
    }

    #[test]
    fn test_topics_are_capped() {
        let text: String = (1..=12)
            .map(|n| format!("{}. 事项{}\n", n, n))
            .collect();
        let record = extract(&text);

        assert_eq!(record.topics.len(), 10);
        assert_eq!(record.topics[9].text, "事项10");
    }

    #[test]
    fn test_unstructured_text_stays_default() {
        let record = extract("今天天气不错");
        assert!(record.is_all_default());
    }
}
