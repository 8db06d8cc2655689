//! Prompt construction for the secondary extraction pass
//!
//! The model is asked to answer in the same labeled line format that
//! [`MeetingRecord::to_labeled_text`](minutes_domain::MeetingRecord::to_labeled_text)
//! produces, so its output can go back through direct extraction.

/// Builds the labeled-format extraction prompt
pub struct PromptBuilder {
    text: String,
    compact: bool,
}

impl PromptBuilder {
    /// Create a new prompt builder for the meeting text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            compact: false,
        }
    }

    /// Leave out the phrasing notes and the worked example
    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(OUTPUT_FORMAT);
        prompt.push_str("\n\n");

        if !self.compact {
            prompt.push_str(PHRASING_NOTES);
            prompt.push_str("\n\n");
            prompt.push_str(WORKED_EXAMPLE);
            prompt.push_str("\n\n");
        }

        prompt.push_str("会议内容：\n");
        prompt.push_str(self.text.trim());
        prompt.push('\n');

        prompt
    }
}

const INSTRUCTIONS: &str = "你是一名会议信息提取助手。请阅读下面的会议描述，\
识别其中的主题、主持人、地点、参会人员、时长以及各个议题，并严格按照指定格式输出，\
不要添加任何解释。";

const OUTPUT_FORMAT: &str = r#"## 输出格式
会议主题：主题内容
主持人：主持人姓名
会议地点：地点
参会人员：人员名单，用顿号分隔
会议时长：时长
议题1：第一个议题
负责人：第一个议题的负责人
会前准备：第一个议题需要提前准备的事项
议题2：第二个议题（如果有）
负责人：第二个议题的负责人（如果有）
会前准备：第二个议题需要提前准备的事项（如果有）

某个字段不存在时保留字段名，冒号后留空。"#;

const PHRASING_NOTES: &str = r#"## 常见表述
- 主题：“关于……的会议”、“讨论……”、“议题是……”
- 地点：“在……开个会”、“会议将在……举行”、“地点是……”
- 参会人员：“参会的有……”、“参加人员包括……”、“到场的有……”
- 议题：“一是……二是……”、“1、2、3”编号，或直接列出
- 负责人：“由……负责”、“……来负责”、“……牵头”
- 会前准备：具体的资料、文件、演示等，只写给负责人的准备事项"#;

const WORKED_EXAMPLE: &str = r#"## 示例
输入：明天上午10点在三楼会议室开个关于项目进度的会议，参加的有张三、李四和王五，会议大概开1小时，主要讨论三个议题：一是项目当前进度，由张三负责；二是遇到的问题，由李四负责，需要准备相关资料；三是下一步计划，王五负责。
输出：
会议主题：项目进度
主持人：
会议地点：三楼会议室
参会人员：张三、李四、王五
会议时长：1小时
议题1：项目当前进度
负责人：张三
会前准备：
议题2：遇到的问题
负责人：李四
会前准备：相关资料
议题3：下一步计划
负责人：王五
会前准备："#;
