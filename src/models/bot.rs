// src/models/bot.rs

/// 机器人可用命令及其说明，顺序即 `/help` 中的展示顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Help,
    Download,
    Table,
    Forward,
    Exit,
    ListenDownload,
    ListenForward,
    ListenInfo,
}

impl BotCommand {
    pub const fn values() -> [BotCommand; 8] {
        [
            BotCommand::Help,
            BotCommand::Download,
            BotCommand::Table,
            BotCommand::Forward,
            BotCommand::Exit,
            BotCommand::ListenDownload,
            BotCommand::ListenForward,
            BotCommand::ListenInfo,
        ]
    }

    pub fn command(&self) -> &'static str {
        match self {
            BotCommand::Help => "help",
            BotCommand::Download => "download",
            BotCommand::Table => "table",
            BotCommand::Forward => "forward",
            BotCommand::Exit => "exit",
            BotCommand::ListenDownload => "listen_download",
            BotCommand::ListenForward => "listen_forward",
            BotCommand::ListenInfo => "listen_info",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BotCommand::Help => "展示可用命令。",
            BotCommand::Download => {
                "分配新的下载任务(多种使用方式见使用说明)。\n`/download https://t.me/x/x 起始ID 结束ID`"
            }
            BotCommand::Table => "在终端输出当前下载情况的统计信息。",
            BotCommand::Forward => {
                "从频道A转发至频道B 起始ID 结束ID。\n`/forward https://t.me/A https://t.me/B 1 100`"
            }
            BotCommand::Exit => "退出软件。",
            BotCommand::ListenDownload => {
                "实时监听该链接的最新消息进行下载。\n`/listen_download https://t.me/A https://t.me/B https://t.me/n`"
            }
            BotCommand::ListenForward => "实时监听该链接的最新消息进行转发。\n`/listen_forward 监听频道 转发频道`",
            BotCommand::ListenInfo => "查看当前已经创建的监听信息。",
        }
    }

    pub fn with_description(&self) -> String {
        format!("/{} - {}", self.command(), self.description())
    }
}
