// Fixed instruction templates, kept word for word (including line breaks and
// indentation) from the prompts the tool has always sent. The job description
// is sent as its own part, so neither template has placeholders.

/// Qualitative review from the point of view of a hiring manager.
pub const DETAILED_REVIEW_INSTRUCTION: &str = "
    You are an experienced Technical Human Resource Manager. Review the provided resume 
    against the job description. Provide a professional evaluation of the candidate's 
    profile alignment with the role. Highlight strengths and weaknesses in relation to 
    the specified job requirements.
    ";

/// ATS-style scan: percentage, missing keywords, verdict.
pub const MATCH_PERCENTAGE_INSTRUCTION: &str = "
    Act as an skilled ATS scanner with deep understanding of data science and 
    tracking system functionality. Evaluate the resume against the job description. 
    Provide:
    1. Percentage match
    2. Missing keywords 
    3. Final assessment
    ";
