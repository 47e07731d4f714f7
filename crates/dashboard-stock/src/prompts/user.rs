//! User message template for the analysis request

use super::BilingualTemplate;

/// Five-section analysis request; the only variable is `symbol`
pub fn analyze_stock_prompt() -> BilingualTemplate {
    BilingualTemplate::new(
        "stock.user.analyze_stock",
        r"Please analyze {{ symbol }} stock, covering:
1. Company fundamentals: financial condition, revenue growth, profit margins
2. Technical analysis: price trend, support/resistance levels, volume
3. Industry position: market share, competitive advantages, industry development
4. Future outlook: growth opportunities, potential risks, strategy
5. Investment advice: short-term and long-term recommendations, risk warnings

Answer in markdown; be professional, objective and comprehensive.",
        r"请分析{{ symbol }}股票，包括：
1. 公司基本面：财务状况、营收增长、利润率
2. 技术面分析：价格趋势、支撑/阻力位、成交量
3. 行业地位：市场份额、竞争优势、行业发展
4. 未来前景：增长机会、潜在风险、发展战略
5. 投资建议：短期和长期投资建议，风险提示

使用markdown格式回答，要专业、客观、全面。",
    )
}
