// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Fixed prompts and canned replies

/// Persona and task framing for chat replies
pub const CHAT_SYSTEM_INSTRUCTION: &str = "Bạn là trợ lý ảo của GreenLoop, nền tảng thu gom rác thải và đổi điểm thưởng. \
Hãy trả lời ngắn gọn, thân thiện bằng tiếng Việt. Giúp người dùng phân loại rác đúng cách \
(rác hữu cơ, rác tái chế, rác nguy hại, rác cồng kềnh), đặt lịch thu gom, \
và hiểu cách tích điểm để đổi quà. Nếu câu hỏi không liên quan, hãy nhẹ nhàng đưa cuộc trò chuyện \
về chủ đề môi trường và GreenLoop.";

/// Instruction sent with every classification image
pub const CLASSIFY_INSTRUCTION: &str = "Phân tích hình ảnh rác thải này. \
Xác định loại rác thuộc một trong các nhóm: Organic, Recyclable, Hazardous, Bulky. \
Ước lượng độ tin cậy (dạng phần trăm, ví dụ \"85%\"), số điểm thưởng ước tính (số nguyên) \
và một lời khuyên ngắn bằng tiếng Việt về cách xử lý. \
Chỉ trả về JSON theo định dạng: \
{\"type\": \"...\", \"confidence\": \"...\", \"points\": 0, \"message\": \"...\"}";

/// Reply when no provider credential is configured
pub const MAINTENANCE_REPLY: &str = "Hệ thống AI đang bảo trì. Vui lòng thử lại sau.";

/// Reply when the provider answers with empty text
pub const EMPTY_REPLY: &str = "Xin lỗi, tôi chưa hiểu ý bạn. Bạn có thể nói rõ hơn không?";

/// Reply when the provider call fails
pub const BUSY_REPLY: &str = "Hệ thống đang bận, vui lòng thử lại sau giây lát.";

/// Sampling temperature for chat replies
pub const CHAT_TEMPERATURE: f32 = 0.7;
