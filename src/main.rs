// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use a11y_audit::config::settings::Settings;
use a11y_audit::presentation::cli::{dispatch, Cli, Mode};
use a11y_audit::utils::telemetry;
use clap::Parser;

/// 主函数
///
/// 解析运行模式后执行对应用例，配置在模式确定后才加载
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();

    // 2. Parse mode
    let cli = Cli::parse();

    // 3. Run the selected mode
    dispatch(Mode::parse(cli.mode.as_deref()), Settings::new).await
}
